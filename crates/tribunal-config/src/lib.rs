//! # tribunal-config
//!
//! TOML configuration for the trial engine: the completion endpoint, the
//! batch worker pool and per-call guard, and the transcript summary window.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use tribunal_config::TribunalConfig;
//!
//! let config = TribunalConfig::from_file(Path::new("config/tribunal.toml"))?;
//! let policy = config.call_policy();
//! ```

pub mod loader;
pub mod settings;

pub use settings::{ProviderSettings, RuntimeSettings, TranscriptSettings, TribunalConfig};

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::Path;
    use std::time::Duration;

    use tribunal_contracts::error::TribunalError;

    use crate::TribunalConfig;

    fn config_error(toml: &str) -> String {
        match TribunalConfig::from_toml_str(toml) {
            Err(TribunalError::Config { reason }) => reason,
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn empty_document_yields_defaults() {
        let config = TribunalConfig::from_toml_str("").unwrap();
        assert_eq!(config, TribunalConfig::default());
        assert_eq!(config.provider.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(config.provider.model, "llama3-70b-8192");
        assert_eq!(config.provider.api_key_env, "GROQ_API_KEY");
        assert_eq!(config.provider.temperature, 0.7);
        assert_eq!(config.provider.max_tokens, 1024);
        assert_eq!(config.runtime.concurrency, 4);
        assert_eq!(config.runtime.max_retries, 0);
        assert_eq!(config.runtime.min_description_chars, 10);
        assert_eq!(config.transcript.summary_window, 10);
        assert_eq!(config.transcript.summary_truncate_chars, 100);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = TribunalConfig::from_toml_str(
            r#"
            [provider]
            model = "llama-3.3-70b-versatile"

            [runtime]
            concurrency = 16
            max_retries = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.provider.model, "llama-3.3-70b-versatile");
        assert_eq!(config.provider.max_tokens, 1024);
        assert_eq!(config.runtime.concurrency, 16);
        assert_eq!(config.runtime.max_retries, 2);
        assert_eq!(config.runtime.call_timeout_secs, 60);
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let reason = config_error("[runtime]\nconcurrency = 0");
        assert!(reason.contains("runtime.concurrency"), "reason was: {reason}");
    }

    #[test]
    fn zero_summary_window_is_rejected() {
        let reason = config_error("[transcript]\nsummary_window = 0");
        assert!(reason.contains("summary_window"), "reason was: {reason}");
    }

    #[test]
    fn out_of_range_temperature_is_rejected() {
        let reason = config_error("[provider]\ntemperature = 2.5");
        assert!(reason.contains("temperature"), "reason was: {reason}");
        assert!(TribunalConfig::from_toml_str("[provider]\ntemperature = 0.0").is_ok());
    }

    #[test]
    fn empty_model_and_zero_tokens_are_rejected() {
        assert!(config_error("[provider]\nmodel = \"  \"").contains("provider.model"));
        assert!(config_error("[provider]\nmax_tokens = 0").contains("max_tokens"));
        assert!(config_error("[provider]\nbase_url = \"\"").contains("base_url"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let reason = config_error("[runtime]\nconcurency = 8");
        assert!(reason.contains("failed to parse"), "reason was: {reason}");
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let reason = config_error("[runtime\nconcurrency = 8");
        assert!(reason.contains("failed to parse configuration TOML"));
    }

    #[test]
    fn call_policy_maps_runtime_settings() {
        let config = TribunalConfig::from_toml_str(
            "[runtime]\ncall_timeout_secs = 30\nmax_retries = 3\nretry_backoff_ms = 250",
        )
        .unwrap();
        let policy = config.call_policy();
        assert_eq!(policy.timeout, Some(Duration::from_secs(30)));
        assert_eq!(policy.max_retries, 3);
        assert_eq!(policy.backoff, Duration::from_millis(250));
    }

    #[test]
    fn zero_timeout_disables_the_timeout() {
        let config = TribunalConfig::from_toml_str("[runtime]\ncall_timeout_secs = 0").unwrap();
        assert_eq!(config.call_policy().timeout, None);
    }

    #[test]
    fn summary_window_maps_transcript_settings() {
        let config = TribunalConfig::from_toml_str("[transcript]\nsummary_window = 6").unwrap();
        let window = config.summary_window();
        assert_eq!(window.entries, 6);
        assert_eq!(window.truncate_chars, 100);
    }

    #[test]
    fn from_file_reads_and_validates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[runtime]\nconcurrency = 2").unwrap();

        let config = TribunalConfig::from_file(file.path()).unwrap();
        assert_eq!(config.runtime.concurrency, 2);
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let result = TribunalConfig::from_file(Path::new("/nonexistent/tribunal.toml"));
        match result {
            Err(TribunalError::Config { reason }) => {
                assert!(reason.contains("failed to read configuration file"));
            }
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn load_without_path_uses_defaults() {
        assert_eq!(TribunalConfig::load(None).unwrap(), TribunalConfig::default());
    }
}
