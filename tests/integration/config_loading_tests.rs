//! Configuration loading integration tests
//!
//! Tests for loading configuration from YAML files and environment variables.

#[cfg(test)]
mod tests {
    use crate::common::init_test_logging;
    use ntp_checker::config::{LoggingConfig, Validate};
    use ntp_checker::utils::init_tracing;
    use ntp_checker::{CheckerError, Config};
    use std::io::Write;
    use std::time::Duration;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    // ==================== File loading ====================

    /// Test that a minimal file picks up every default
    #[tokio::test]
    async fn test_load_minimal_file() {
        let file = write_config("ntp_server: pool.ntp.org\n");

        let config = Config::from_file(file.path()).await.unwrap();

        assert_eq!(config.checker().ntp_server, "pool.ntp.org");
        assert_eq!(config.checker().check_interval(), Duration::from_secs(86_400));
        assert_eq!(config.checker().slip_tolerance(), chrono::TimeDelta::seconds(30));
        assert_eq!(config.checker().retry.max_retries, 5);
        assert!(config.checker().validate().is_ok());
    }

    /// Test that a missing file reports a configuration error
    #[tokio::test]
    async fn test_load_missing_file() {
        let err = Config::from_file("/nonexistent/ntp-checker.yaml")
            .await
            .unwrap_err();

        assert!(matches!(err, CheckerError::Config(_)));
        assert!(err.to_string().contains("Failed to read config file"));
    }

    /// Test that invalid values in a file are rejected
    #[tokio::test]
    async fn test_load_invalid_file() {
        let file = write_config("ntp_server: pool.ntp.org\nmax_time_slip_secs: 0\n");

        let err = Config::from_file(file.path()).await.unwrap_err();
        assert!(err.to_string().contains("max_time_slip_secs"));
    }

    /// Test that a saved configuration loads back unchanged
    #[tokio::test]
    async fn test_save_and_reload() {
        let original = Config::from_yaml_str(
            "ntp_server: time.example.com\ncheck_interval_secs: 600\nretry:\n  max_retries: 1\n",
        )
        .unwrap();
        let file = write_config(&original.to_yaml().unwrap());

        let reloaded = Config::from_file(file.path()).await.unwrap();
        assert_eq!(reloaded.checker().check_interval_secs, 600);
        assert_eq!(reloaded.checker().retry, original.checker().retry);
    }

    // ==================== Environment loading ====================

    /// All environment cases live in one test because variables are process-wide
    #[test]
    fn test_load_from_env() {
        // SAFETY: no other test in this binary reads or writes these variables.
        unsafe {
            std::env::set_var("NTP_SERVER", "time.env.example.com");
            std::env::set_var("NTP_CHECK_INTERVAL_SECS", "3600");
            std::env::set_var("NTP_MAX_RETRIES", "7");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.checker().ntp_server, "time.env.example.com");
        assert_eq!(config.checker().check_interval_secs, 3600);
        assert_eq!(config.checker().retry.max_retries, 7);
        assert_eq!(config.checker().max_time_slip_secs, 60);

        unsafe {
            std::env::set_var("NTP_CHECK_INTERVAL_SECS", "soon");
        }
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("NTP_CHECK_INTERVAL_SECS"));

        unsafe {
            std::env::remove_var("NTP_SERVER");
            std::env::remove_var("NTP_CHECK_INTERVAL_SECS");
            std::env::remove_var("NTP_MAX_RETRIES");
        }
    }

    // ==================== Logging ====================

    /// Test that a second subscriber installation is reported, not panicked on
    #[test]
    fn test_logging_installs_once() {
        init_test_logging();

        let err = init_tracing(&LoggingConfig::default()).unwrap_err();
        assert!(matches!(err, CheckerError::Logging(_)));
    }
}
