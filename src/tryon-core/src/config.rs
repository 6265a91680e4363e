use crate::error::config::ConfigError;

/// Environment variable consulted when no explicit API key is given.
pub const API_KEY_VAR: &str = "GOOGLE_GEMINI_API_KEY";

/// Resolves the Gemini API key: an explicit parameter wins, otherwise the
/// `GOOGLE_GEMINI_API_KEY` environment variable. Empty values count as
/// absent.
pub fn resolve_api_key(explicit: Option<String>) -> Result<String, ConfigError> {
    resolve_api_key_from(explicit, std::env::var(API_KEY_VAR).ok())
}

fn resolve_api_key_from(
    explicit: Option<String>,
    fallback: Option<String>,
) -> Result<String, ConfigError> {
    explicit
        .filter(|key| !key.is_empty())
        .or(fallback.filter(|key| !key.is_empty()))
        .ok_or(ConfigError::ApiKeyNotFound(API_KEY_VAR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_key_wins_over_fallback() {
        let key = resolve_api_key_from(Some("param".to_string()), Some("env".to_string()));
        assert_eq!(key.unwrap(), "param");
    }

    #[test]
    fn fallback_used_when_no_explicit_key() {
        let key = resolve_api_key_from(None, Some("env".to_string()));
        assert_eq!(key.unwrap(), "env");
    }

    #[test]
    fn empty_explicit_key_falls_through() {
        let key = resolve_api_key_from(Some("".to_string()), Some("env".to_string()));
        assert_eq!(key.unwrap(), "env");
    }

    #[test]
    fn missing_key_is_a_config_error() {
        let err = resolve_api_key_from(None, None).unwrap_err();
        assert!(err.to_string().contains(API_KEY_VAR));

        let err = resolve_api_key_from(Some("".to_string()), Some("".to_string())).unwrap_err();
        assert!(err.to_string().contains(API_KEY_VAR));
    }
}
