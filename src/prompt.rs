//! Prompt enhancement: the user's prompt followed by style, quality and framing clauses.

pub const STYLE_MODIFIERS: &[(&str, &str)] = &[
    (
        "photorealistic",
        "photorealistic, highly detailed, professional photography",
    ),
    ("artistic", "artistic, creative, stylized, beautiful art"),
    ("minimalist", "minimalist, clean, simple, elegant design"),
    ("vintage", "vintage style, retro, aged, nostalgic"),
    ("cyberpunk", "cyberpunk, neon, futuristic, sci-fi"),
    ("fantasy", "fantasy art, magical, ethereal, mystical"),
    ("abstract", "abstract art, modern, contemporary, conceptual"),
];

pub const ASPECT_RATIO_CLAUSES: &[(&str, &str)] = &[
    ("portrait", ", vertical composition, portrait orientation"),
    ("landscape", ", horizontal composition, landscape orientation"),
    ("square", ", square composition, balanced framing"),
    ("widescreen", ", cinematic wide shot, panoramic view"),
];

pub const HIGH_QUALITY_CLAUSE: &str = ", ultra high quality, 8k resolution, masterpiece";
pub const STANDARD_QUALITY_CLAUSE: &str = ", high quality, detailed";

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, value)| *value)
}

pub fn style_modifier(style: &str) -> Option<&'static str> {
    lookup(STYLE_MODIFIERS, style)
}

pub fn aspect_ratio_clause(aspect_ratio: &str) -> Option<&'static str> {
    lookup(ASPECT_RATIO_CLAUSES, aspect_ratio)
}

pub fn quality_clause(quality: &str) -> Option<&'static str> {
    match quality {
        "" => None,
        "high" => Some(HIGH_QUALITY_CLAUSE),
        _ => Some(STANDARD_QUALITY_CLAUSE),
    }
}

/// Builds the enhanced prompt. Unknown style and aspect ratio keys add nothing.
pub fn compose(prompt: &str, style: &str, aspect_ratio: &str, quality: &str) -> String {
    let mut enhanced = prompt.trim().to_string();

    if let Some(modifier) = style_modifier(style) {
        enhanced.push_str(", ");
        enhanced.push_str(modifier);
    }
    if let Some(clause) = quality_clause(quality) {
        enhanced.push_str(clause);
    }
    if let Some(clause) = aspect_ratio_clause(aspect_ratio) {
        enhanced.push_str(clause);
    }

    enhanced
}
