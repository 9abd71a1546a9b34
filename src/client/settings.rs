//! Public client settings handed to the browser bundle

use serde::{Deserialize, Serialize};

use super::BaseUrls;
use crate::flows::OAuthProvider;

/// Body of `GET /client-config.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub api_base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oauth_base_url: Option<String>,
    #[serde(default)]
    pub oauth: OAuthProvider,
}

impl ClientConfig {
    pub fn bases(&self) -> BaseUrls {
        let bases = BaseUrls::new(&self.api_base_url);
        match &self.oauth_base_url {
            Some(oauth) if !oauth.trim().is_empty() => bases.with_oauth(oauth),
            _ => bases,
        }
    }
}

#[cfg(feature = "native")]
impl From<&crate::config::Config> for ClientConfig {
    fn from(config: &crate::config::Config) -> Self {
        Self {
            api_base_url: config.api.base_url.clone(),
            oauth_base_url: config.api.oauth_base_url.clone(),
            oauth: config.oauth.provider(),
        }
    }
}
