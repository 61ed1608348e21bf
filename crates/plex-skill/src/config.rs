use crate::error::{Result, SkillError};
use url::Url;

/// Process-wide settings, fixed for the life of the process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillConfig {
    base_url: Url,
    api_key: String,
}

impl SkillConfig {
    /// Validate the control server base URL and API key. Neither has a default.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(SkillError::Config("API key must not be empty".into()));
        }
        let mut base_url = Url::parse(base_url.trim())
            .map_err(|e| SkillError::Config(format!("control server URL {:?}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(SkillError::Config(format!(
                "control server URL {} cannot be used as a base",
                base_url
            )));
        }
        // Treat the base as a directory so joins append instead of replacing.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { base_url, api_key })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Absolute URL for a path relative to the base
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| SkillError::Config(format!("joining {:?}: {}", path, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_appends_to_base_path() {
        let cfg = SkillConfig::new("http://media.local:3000/plex", "k").unwrap();
        assert_eq!(
            cfg.endpoint("ondeck").unwrap().as_str(),
            "http://media.local:3000/plex/ondeck"
        );

        let cfg = SkillConfig::new("http://media.local:3000/", "k").unwrap();
        assert_eq!(
            cfg.endpoint("play").unwrap().as_str(),
            "http://media.local:3000/play"
        );
    }

    #[test]
    fn test_rejects_missing_values() {
        assert!(matches!(
            SkillConfig::new("http://media.local", "  "),
            Err(SkillError::Config(_))
        ));
        assert!(matches!(
            SkillConfig::new("not a url", "key"),
            Err(SkillError::Config(_))
        ));
        assert!(matches!(
            SkillConfig::new("mailto:someone@example.com", "key"),
            Err(SkillError::Config(_))
        ));
    }

    #[test]
    fn test_api_key_is_kept_verbatim() {
        let cfg = SkillConfig::new("https://media.local", "s3cret").unwrap();
        assert_eq!(cfg.api_key(), "s3cret");
        assert_eq!(cfg.base_url().as_str(), "https://media.local/");
    }
}
