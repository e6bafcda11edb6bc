//! Tests for validated configuration.

use std::time::Duration;

use super::ConfigError;
use super::cli::Cli;
use super::toml::TomlConfig;
use super::validated::ValidatedConfig;

/// Helper to create CLI args from a slice
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["chapa", "banks"];
    full_args.extend(args);
    Cli::parse_from_iter(full_args)
}

/// Helper to parse TOML config
fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).unwrap()
}

mod defaults {
    use super::*;

    #[test]
    fn built_in_defaults_apply() {
        let config = ValidatedConfig::from_raw(&cli(&["--secret-key", "sk"]), None).unwrap();

        assert_eq!(config.base_url.as_str(), "https://api.chapa.co/v1");
        assert_eq!(config.retries, 0);
        assert_eq!(config.retry_delay, Duration::from_millis(1000));
        assert_eq!(config.timeout, Duration::from_millis(30_000));
        assert!(!config.log_requests);
        assert!(!config.debug);
    }
}

mod precedence {
    use super::*;

    const FILE: &str = r#"
        [api]
        secret_key = "from-toml"
        webhook_secret = "whsec-toml"
        base_url = "http://toml.local/v1"

        [request]
        timeout_ms = 7000

        [retry]
        retries = 4
        delay_ms = 400
    "#;

    #[test]
    fn toml_overrides_defaults() {
        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml(FILE))).unwrap();

        assert_eq!(config.secret_key.as_deref(), Some("from-toml"));
        assert_eq!(config.webhook_secret.as_deref(), Some("whsec-toml"));
        assert_eq!(config.base_url.as_str(), "http://toml.local/v1");
        assert_eq!(config.timeout, Duration::from_millis(7000));
        assert_eq!(config.retries, 4);
        assert_eq!(config.retry_delay, Duration::from_millis(400));
    }

    #[test]
    fn cli_overrides_toml() {
        let cli = cli(&[
            "--secret-key",
            "from-cli",
            "--base-url",
            "http://cli.local/v1",
            "--retries",
            "1",
            "--retry-delay",
            "50",
            "--timeout",
            "900",
        ]);

        let config = ValidatedConfig::from_raw(&cli, Some(&toml(FILE))).unwrap();

        assert_eq!(config.secret_key.as_deref(), Some("from-cli"));
        assert_eq!(config.base_url.as_str(), "http://cli.local/v1");
        assert_eq!(config.retries, 1);
        assert_eq!(config.retry_delay, Duration::from_millis(50));
        assert_eq!(config.timeout, Duration::from_millis(900));
        // Not given on the CLI, so the file still wins
        assert_eq!(config.webhook_secret.as_deref(), Some("whsec-toml"));
    }

    #[test]
    fn logging_flags_use_or_semantics() {
        let file = toml("[logging]\nrequests = true");

        let from_toml = ValidatedConfig::from_raw(&cli(&[]), Some(&file)).unwrap();
        let from_cli = ValidatedConfig::from_raw(&cli(&["--debug"]), Some(&file)).unwrap();

        assert!(from_toml.log_requests);
        assert!(!from_toml.debug);
        assert!(from_cli.log_requests);
        assert!(from_cli.debug);
    }
}

mod invalid_values {
    use super::*;

    #[test]
    fn zero_timeout_is_rejected() {
        let result = ValidatedConfig::from_raw(&cli(&["--timeout", "0"]), None);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidDuration {
                field: "timeout",
                ..
            })
        ));
    }

    #[test]
    fn zero_retry_delay_from_toml_is_rejected() {
        let result = ValidatedConfig::from_raw(&cli(&[]), Some(&toml("[retry]\ndelay_ms = 0")));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidDuration {
                field: "retry_delay",
                ..
            })
        ));
    }

    #[test]
    fn malformed_base_url_is_rejected() {
        let result = ValidatedConfig::from_raw(&cli(&["--base-url", "not a url"]), None);

        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let result = ValidatedConfig::from_raw(&cli(&["--base-url", "ftp://example.com"]), None);

        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
    }
}

mod client_config {
    use super::*;

    #[test]
    fn missing_secret_key_is_reported_when_needed() {
        let file = toml("[api]\nsecret_key = \"  \"");
        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&file)).unwrap();

        assert!(matches!(
            config.client_config(),
            Err(ConfigError::MissingRequired {
                field: "secret_key",
                ..
            })
        ));
    }

    #[test]
    fn carries_every_setting() {
        let cli = cli(&[
            "--secret-key",
            "sk",
            "--webhook-secret",
            "whsec",
            "--retries",
            "2",
            "--retry-delay",
            "10",
            "--timeout",
            "20",
            "--log-requests",
        ]);
        let client = ValidatedConfig::from_raw(&cli, None)
            .unwrap()
            .client_config()
            .unwrap();

        assert_eq!(client.secret_key(), "sk");
        assert_eq!(client.webhook_secret(), Some("whsec"));
        assert_eq!(client.retries(), 2);
        assert_eq!(client.retry_delay(), Duration::from_millis(10));
        assert_eq!(client.timeout(), Duration::from_millis(20));
        assert!(client.logging());
        assert!(!client.debug());
        assert_eq!(client.base_url(), "https://api.chapa.co/v1");
    }

    #[test]
    fn display_never_shows_secrets() {
        let config = ValidatedConfig::from_raw(
            &cli(&["--secret-key", "CHASECK_TEST-hidden", "--webhook-secret", "whsec-hidden"]),
            None,
        )
        .unwrap();

        let shown = format!("{config} {config:?}");

        assert!(!shown.contains("hidden"));
        assert!(shown.contains("secret_key: set"));
    }
}

mod config_load {
    use std::io::Write;
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn load_from_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [api]
            secret_key = "from-file"

            [retry]
            retries = 3
        "#
        )
        .unwrap();

        let cli = cli(&["--config", file.path().to_str().unwrap()]);
        let config = ValidatedConfig::load(&cli).unwrap();

        assert_eq!(config.secret_key.as_deref(), Some("from-file"));
        assert_eq!(config.retries, 3);
    }

    #[test]
    fn load_nonexistent_config_file_returns_error() {
        let cli = cli(&["--config", "nonexistent_file_12345.toml"]);
        let result = ValidatedConfig::load(&cli);

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }
}

mod write_config {
    use std::fs;
    use tempfile::tempdir;

    use super::super::validated::write_default_config;
    use super::*;

    #[test]
    fn write_default_config_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test-config.toml");

        write_default_config(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("[api]"));
        assert!(content.contains("[retry]"));
        assert!(TomlConfig::parse(&content).is_ok());
    }

    #[test]
    fn write_default_config_to_invalid_path_returns_error() {
        use std::path::Path;
        // Try writing to an invalid path (directory that doesn't exist)
        let path = Path::new("/nonexistent_dir_12345/config.toml");
        let result = write_default_config(path);

        assert!(matches!(result, Err(ConfigError::FileWrite { .. })));
    }
}
