//! Current-user profile model.

use std::collections::HashMap;

use serde::Deserialize;

/// Represents the authenticated user returned by the `myself` endpoint.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Myself {
    pub account_id: Option<String>,
    pub display_name: Option<String>,
    pub email_address: Option<String>,
    #[serde(default)]
    pub avatar_urls: HashMap<String, String>,
}

impl Myself {
    /// Returns the largest avatar url the service provided, if any.
    pub fn avatar(&self) -> Option<String> {
        self.avatar_urls
            .get("48x48")
            .or_else(|| self.avatar_urls.values().next())
            .cloned()
    }
}
