// Store configuration
//
// The gateway needs the hosted project's base URL and its publishable anon
// key; the bearer token comes from the session provider per request.

use url::Url;

use campushub_core::error::{Result, StoreError};

pub const ENV_URL: &str = "CAMPUSHUB_SUPABASE_URL";
pub const ENV_ANON_KEY: &str = "CAMPUSHUB_SUPABASE_ANON_KEY";

#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Project base URL, e.g. `https://abcdefgh.supabase.co`.
    pub base_url: Url,
    /// Publishable anon key sent as the `apikey` header on every request.
    pub anon_key: String,
}

impl StoreConfig {
    pub fn new(base_url: impl AsRef<str>, anon_key: impl Into<String>) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())
            .map_err(|e| StoreError::config(format!("invalid store URL: {e}")))?;
        Ok(Self {
            base_url,
            anon_key: anon_key.into(),
        })
    }

    /// Read the configuration from the environment.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(ENV_URL)
            .map_err(|_| StoreError::config(format!("{ENV_URL} environment variable not set")))?;
        let anon_key = std::env::var(ENV_ANON_KEY).map_err(|_| {
            StoreError::config(format!("{ENV_ANON_KEY} environment variable not set"))
        })?;
        Self::new(base_url, anon_key)
    }

    /// REST endpoint for a collection. Names with spaces (the legacy partner
    /// events collection) are percent-encoded by the URL parser.
    pub(crate) fn endpoint(&self, collection: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/rest/v1/{collection}")).map_err(|e| {
            StoreError::config(format!("invalid endpoint for {collection}: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_and_encodes() {
        let config = StoreConfig::new("https://example.supabase.co", "anon").unwrap();
        assert_eq!(
            config.endpoint("events").unwrap().as_str(),
            "https://example.supabase.co/rest/v1/events"
        );
        assert_eq!(
            config.endpoint("partner events").unwrap().as_str(),
            "https://example.supabase.co/rest/v1/partner%20events"
        );
    }

    #[test]
    fn rejects_garbage_urls() {
        assert!(matches!(
            StoreConfig::new("not a url", "anon"),
            Err(StoreError::Configuration(_))
        ));
    }
}
