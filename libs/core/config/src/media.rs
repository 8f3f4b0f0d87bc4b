use crate::{env_or_default, ConfigError, FromEnv};

/// Where uploaded files are served from.
///
/// Stored file references are relative paths such as
/// `uploads/product-images/shoe.jpg`; `url_for` joins them onto `base_url`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaConfig {
    pub base_url: String,
}

impl MediaConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { base_url }
    }

    /// Resolve a stored file reference to a public URL.
    ///
    /// Absolute `http(s)://` references are returned unchanged.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl FromEnv for MediaConfig {
    /// Reads MEDIA_URL (default `/media/`)
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = env_or_default("MEDIA_URL", "/media/");
        if base_url.trim().is_empty() {
            return Err(ConfigError::ParseError {
                key: "MEDIA_URL".to_string(),
                details: "must not be empty".to_string(),
            });
        }
        Ok(Self::new(base_url))
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self::new("/media/")
    }
}
