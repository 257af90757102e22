use serde::{Deserialize, Serialize};

/// A work sample shown on a partner's public profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: String,
    pub partner_id: String,
    pub image_url: String,
    pub caption: String,
}

/// Payload for adding a portfolio item; the id is assigned on create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioCreate {
    pub partner_id: String,
    pub image_url: String,
    #[serde(default)]
    pub caption: String,
}

/// Partial update applied with PATCH semantics; absent fields are untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl PortfolioUpdate {
    /// Fold this patch into an existing item.
    pub fn apply_to(&self, item: &mut Portfolio) {
        if let Some(image_url) = &self.image_url {
            item.image_url = image_url.clone();
        }
        if let Some(caption) = &self.caption {
            item.caption = caption.clone();
        }
    }
}
