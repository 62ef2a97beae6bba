//! 데모 서버 설정
//!
//! 미들웨어 자체는 생성자 인자로만 설정합니다. 이 모듈은 바이너리가 쓰는 서버,
//! 로깅, CORS 설정을 환경 변수 또는 TOML 파일에서 읽습니다.

use serde::Deserialize;
use std::{env, fs, path::Path};
use tracing::debug;

use crate::middleware::CorsConfig;

mod error;
pub mod logging;
mod server;

pub use error::SettingsError;
pub use logging::{LogFormat, LogOutput, LogSettings};
pub use server::{parse_env_var, ServerSettings};

pub type Result<T> = std::result::Result<T, SettingsError>;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub logging: LogSettings,

    #[serde(default)]
    pub cors: CorsConfig,

    /// 데모 라우트가 받아들이는 Bearer 토큰
    #[serde(default = "default_demo_token")]
    pub demo_token: String,
}

fn default_demo_token() -> String {
    "demo-token".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            logging: LogSettings::default(),
            cors: CorsConfig::default(),
            demo_token: default_demo_token(),
        }
    }
}

impl Settings {
    /// `CHAIN_CONFIG_FILE`이 있으면 TOML 파일에서, 없으면 환경 변수에서 읽습니다.
    pub fn load() -> Result<Self> {
        if let Ok(config_path) = env::var("CHAIN_CONFIG_FILE") {
            debug!(path = %config_path, "설정 파일에서 설정 로드");
            Self::from_toml_file(&config_path)
        } else {
            Self::from_env()
        }
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).map_err(|e| SettingsError::FileError {
            path: path.as_ref().to_string_lossy().to_string(),
            error: e,
        })?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| SettingsError::ParseError { source: e })?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn from_env() -> Result<Self> {
        let settings = Self {
            server: ServerSettings::from_env()?,
            logging: LogSettings::from_env()?,
            cors: CorsConfig {
                domain: env::var("CHAIN_CORS_DOMAIN").unwrap_or_default(),
                allow_headers: env::var("CHAIN_CORS_ALLOW_HEADERS")
                    .map(|v| CorsConfig::parse_header_list(&v))
                    .unwrap_or_default(),
            },
            demo_token: env::var("CHAIN_DEMO_TOKEN").unwrap_or_else(|_| default_demo_token()),
        };

        settings.validate()?;
        Ok(settings)
    }

    /// 설정 유효성 검증
    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;

        if self.demo_token.trim().is_empty() {
            return Err(SettingsError::InvalidConfig(
                "demo_token은 비어 있을 수 없습니다".to_string(),
            ));
        }

        Ok(())
    }
}
