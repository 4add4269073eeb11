pub const DEFAULT_THEME_STORAGE_KEY: &str = "theme";

/// Where the backend lives and where client-local state is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix for every backend path. Empty means same-origin.
    pub api_base: String,
    pub theme_storage_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            theme_storage_key: DEFAULT_THEME_STORAGE_KEY.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn with_api_base(api_base: Option<String>) -> Self {
        let api_base = api_base
            .map(|base| base.trim().trim_end_matches('/').to_string())
            .unwrap_or_default();
        Self {
            api_base,
            ..Self::default()
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}
