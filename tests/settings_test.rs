use adapter_chain::settings::{LogFormat, LogOutput, Settings, SettingsError};
use std::sync::Once;

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    static INIT: Once = Once::new();

    fn setup() {
        INIT.call_once(|| {
            cleanup_env();
        });
    }

    fn teardown() {
        cleanup_env();
    }

    fn cleanup_env() {
        for name in [
            "CHAIN_CONFIG_FILE",
            "CHAIN_HOST",
            "CHAIN_HTTP_PORT",
            "CHAIN_LOG_FORMAT",
            "CHAIN_LOG_LEVEL",
            "CHAIN_LOG_OUTPUT",
            "CHAIN_CORS_DOMAIN",
            "CHAIN_CORS_ALLOW_HEADERS",
            "CHAIN_DEMO_TOKEN",
        ] {
            std::env::remove_var(name);
        }
    }

    // 테스트용 임시 TOML 파일 생성 헬퍼
    fn create_test_toml(content: &str) -> (String, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("chain.toml");
        std::fs::write(&file_path, content).unwrap();
        (file_path.to_str().unwrap().to_string(), dir)
    }

    #[test]
    #[serial]
    fn test_settings_defaults() {
        setup();
        teardown();

        let settings = Settings::from_env().unwrap();

        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.http_port, 8080);
        assert_eq!(settings.logging.format, LogFormat::Text);
        assert_eq!(settings.logging.level, tracing::Level::INFO);
        assert_eq!(settings.logging.output, LogOutput::Stdout);
        assert!(settings.cors.domain.is_empty());
        assert!(settings.cors.allow_headers.is_empty());
        assert_eq!(settings.demo_token, "demo-token");
    }

    #[test]
    #[serial]
    fn test_settings_from_env() {
        setup();

        std::env::set_var("CHAIN_HOST", "0.0.0.0");
        std::env::set_var("CHAIN_HTTP_PORT", "9090");
        std::env::set_var("CHAIN_LOG_FORMAT", "json");
        std::env::set_var("CHAIN_LOG_LEVEL", "debug");
        std::env::set_var("CHAIN_LOG_OUTPUT", "/tmp/chain.log");
        std::env::set_var("CHAIN_CORS_DOMAIN", "https://app.example.com");
        std::env::set_var("CHAIN_CORS_ALLOW_HEADERS", "Authorization, X-Request-Id,");
        std::env::set_var("CHAIN_DEMO_TOKEN", "secret");

        let settings = Settings::from_env().unwrap();

        assert_eq!(settings.server.addr().unwrap().to_string(), "0.0.0.0:9090");
        assert_eq!(settings.logging.format, LogFormat::Json);
        assert_eq!(settings.logging.level, tracing::Level::DEBUG);
        assert_eq!(settings.logging.output, LogOutput::File("/tmp/chain.log".to_string()));
        assert_eq!(settings.cors.domain, "https://app.example.com");
        assert_eq!(settings.cors.allow_headers, vec!["Authorization", "X-Request-Id"]);
        assert_eq!(settings.demo_token, "secret");

        teardown();
    }

    #[test]
    #[serial]
    fn test_settings_validation() {
        setup();

        // 1. 범위를 벗어난 포트
        std::env::set_var("CHAIN_HTTP_PORT", "99999");
        assert!(matches!(
            Settings::from_env(),
            Err(SettingsError::EnvVarInvalid { .. })
        ));
        teardown();

        // 2. 0번 포트
        std::env::set_var("CHAIN_HTTP_PORT", "0");
        assert!(Settings::from_env().is_err());
        teardown();

        // 3. 잘못된 로그 레벨
        std::env::set_var("CHAIN_LOG_LEVEL", "loud");
        assert!(Settings::from_env().is_err());
        teardown();

        // 4. 잘못된 로그 형식
        std::env::set_var("CHAIN_LOG_FORMAT", "xml");
        assert!(Settings::from_env().is_err());
        teardown();

        // 5. 잘못된 호스트
        std::env::set_var("CHAIN_HOST", "not-an-ip");
        assert!(Settings::from_env().is_err());
        teardown();

        // 6. 빈 데모 토큰
        std::env::set_var("CHAIN_DEMO_TOKEN", "  ");
        assert!(matches!(
            Settings::from_env(),
            Err(SettingsError::InvalidConfig(_))
        ));
        teardown();
    }

    #[test]
    #[serial]
    fn test_settings_from_toml() {
        setup();

        let (path, _dir) = create_test_toml(
            r#"
            demo_token = "toml-token"

            [server]
            http_port = 3000

            [logging]
            format = "json"
            level = "warn"

            [cors]
            domain = "https://app.example.com"
            allow_headers = ["Authorization"]
            "#,
        );

        let settings = Settings::from_toml_file(&path).unwrap();

        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.http_port, 3000);
        assert_eq!(settings.logging.format, LogFormat::Json);
        assert_eq!(settings.logging.level, tracing::Level::WARN);
        assert_eq!(settings.logging.output, LogOutput::Stdout);
        assert_eq!(settings.cors.allow_headers_value(), "Authorization, Content-Type");
        assert_eq!(settings.demo_token, "toml-token");
    }

    #[test]
    #[serial]
    fn test_load_prefers_config_file() {
        setup();

        let (path, _dir) = create_test_toml("[server]\nhttp_port = 4000\n");
        std::env::set_var("CHAIN_CONFIG_FILE", &path);
        std::env::set_var("CHAIN_HTTP_PORT", "5000");

        let settings = Settings::load().unwrap();
        assert_eq!(settings.server.http_port, 4000);
        assert_eq!(settings.demo_token, "demo-token");

        teardown();
    }

    #[test]
    #[serial]
    fn test_toml_errors() {
        setup();

        assert!(matches!(
            Settings::from_toml_file("/nonexistent/chain.toml"),
            Err(SettingsError::FileError { .. })
        ));

        let (path, _dir) = create_test_toml("[server]\nhttp_port = \"eighty\"\n");
        assert!(matches!(
            Settings::from_toml_file(&path),
            Err(SettingsError::ParseError { .. })
        ));

        let (path, _dir) = create_test_toml("[logging]\nlevel = \"loud\"\n");
        assert!(matches!(
            Settings::from_toml_file(&path),
            Err(SettingsError::ParseError { .. })
        ));
    }
}
