use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub badge: &'static str,
    pub badge_color: &'static str,
    pub gradient: &'static str,
    pub available: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ModelCategory {
    pub category: &'static str,
    pub provider: &'static str,
    pub models: Vec<ModelDescriptor>,
}
