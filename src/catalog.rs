//! Static catalog of selectable image models and the picker's selection rules.

use crate::models::{ModelCategory, ModelDescriptor};
use once_cell::sync::Lazy;

static CATALOG: Lazy<Vec<ModelCategory>> = Lazy::new(|| {
    vec![
        ModelCategory {
            category: "Replicate (FLUX) - Partially Available ✅",
            provider: "Replicate",
            models: vec![
                ModelDescriptor {
                    id: "replicate/black-forest-labs/flux-1.1-pro",
                    name: "FLUX 1.1 Pro",
                    description: "Ultra-high quality, state-of-the-art open-source model (VERIFIED WORKING)",
                    badge: "Ultra HD",
                    badge_color: "from-pink-500 to-rose-500",
                    gradient: "from-pink-500 to-rose-600",
                    available: true,
                },
                ModelDescriptor {
                    id: "replicate/black-forest-labs/flux-dev",
                    name: "FLUX Dev",
                    description: "Development version with fast generation times - Integration in progress",
                    badge: "Fast",
                    badge_color: "from-indigo-500 to-blue-500",
                    gradient: "from-indigo-500 to-blue-600",
                    available: false,
                },
                ModelDescriptor {
                    id: "replicate/black-forest-labs/flux-schnell",
                    name: "FLUX Schnell",
                    description: "Fastest FLUX variant for quick iterations - Integration in progress",
                    badge: "Instant",
                    badge_color: "from-yellow-500 to-amber-500",
                    gradient: "from-yellow-500 to-amber-600",
                    available: false,
                },
            ],
        },
        ModelCategory {
            category: "OpenAI (ChatGPT) - Coming Soon 🔄",
            provider: "OpenAI",
            models: vec![
                ModelDescriptor {
                    id: "openai-dalle-3",
                    name: "DALL-E 3",
                    description: "Latest OpenAI model - Integration in progress",
                    badge: "Premium",
                    badge_color: "from-green-500 to-emerald-500",
                    gradient: "from-green-500 to-emerald-600",
                    available: false,
                },
                ModelDescriptor {
                    id: "openai-dalle-2",
                    name: "DALL-E 2",
                    description: "Previous generation OpenAI model - Integration in progress",
                    badge: "Standard",
                    badge_color: "from-blue-500 to-cyan-500",
                    gradient: "from-blue-500 to-cyan-600",
                    available: false,
                },
            ],
        },
        ModelCategory {
            category: "Google AI - Coming Soon 🔄",
            provider: "Google",
            models: vec![
                ModelDescriptor {
                    id: "google-imagen-3",
                    name: "Imagen 3.0",
                    description: "Google's latest image generation model - Integration in progress",
                    badge: "Latest",
                    badge_color: "from-purple-500 to-violet-500",
                    gradient: "from-purple-500 to-violet-600",
                    available: false,
                },
                ModelDescriptor {
                    id: "google-imagen-2",
                    name: "Imagen 2.0",
                    description: "Advanced Google model - Integration in progress",
                    badge: "Popular",
                    badge_color: "from-orange-500 to-red-500",
                    gradient: "from-orange-500 to-red-600",
                    available: false,
                },
            ],
        },
        ModelCategory {
            category: "Stability AI - Coming Soon 🔄",
            provider: "Stability AI",
            models: vec![
                ModelDescriptor {
                    id: "stability-ai/stable-diffusion-3-medium",
                    name: "Stable Diffusion 3 Medium",
                    description: "Latest Stability AI model - Integration in progress",
                    badge: "New",
                    badge_color: "from-teal-500 to-cyan-500",
                    gradient: "from-teal-500 to-cyan-600",
                    available: false,
                },
                ModelDescriptor {
                    id: "stability-ai/stable-diffusion-xl-base-1.0",
                    name: "SDXL Base",
                    description: "High resolution Stable Diffusion XL model - Integration in progress",
                    badge: "HD",
                    badge_color: "from-slate-500 to-gray-500",
                    gradient: "from-slate-500 to-gray-600",
                    available: false,
                },
            ],
        },
    ]
});

pub fn categories() -> &'static [ModelCategory] {
    &CATALOG
}

/// Looks up a descriptor by id, returning it with its provider name.
pub fn find(id: &str) -> Option<(&'static ModelDescriptor, &'static str)> {
    CATALOG.iter().find_map(|category| {
        category
            .models
            .iter()
            .find(|model| model.id == id)
            .map(|model| (model, category.provider))
    })
}

pub fn available_models() -> impl Iterator<Item = &'static ModelDescriptor> {
    CATALOG
        .iter()
        .flat_map(|category| category.models.iter())
        .filter(|model| model.available)
}

/// How one catalog entry should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryState {
    pub selected: bool,
    pub dimmed: bool,
    pub coming_soon: bool,
}

#[derive(Debug, Clone)]
pub struct SelectedModel {
    pub descriptor: &'static ModelDescriptor,
    pub provider: &'static str,
}

/// Controlled picker: holds only the current selection and the disabled flag.
#[derive(Debug, Clone)]
pub struct ModelSelector {
    pub selected_model: String,
    pub disabled: bool,
}

impl ModelSelector {
    pub fn new(selected_model: impl Into<String>) -> Self {
        Self {
            selected_model: selected_model.into(),
            disabled: false,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_model == id
    }

    pub fn selected_info(&self) -> Option<SelectedModel> {
        find(&self.selected_model).map(|(descriptor, provider)| SelectedModel {
            descriptor,
            provider,
        })
    }

    pub fn entry_state(&self, model: &ModelDescriptor) -> EntryState {
        EntryState {
            selected: self.is_selected(model.id),
            dimmed: self.disabled || !model.available,
            coming_soon: !model.available,
        }
    }

    /// Fires `on_select` only for available entries while the picker is enabled.
    /// Returns whether the callback ran.
    pub fn select<F>(&self, id: &str, on_select: F) -> bool
    where
        F: FnOnce(&str),
    {
        if self.disabled {
            return false;
        }
        match find(id) {
            Some((model, _)) if model.available => {
                on_select(model.id);
                true
            }
            _ => false,
        }
    }
}
