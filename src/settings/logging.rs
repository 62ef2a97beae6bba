use serde::{de, Deserialize, Deserializer};
use std::convert::Infallible;
use std::str::FromStr;
use tracing::Level;

use super::{server::parse_env_var, SettingsError};

/// 로그 출력 형식
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("text") {
            Ok(Self::Text)
        } else if s.eq_ignore_ascii_case("json") {
            Ok(Self::Json)
        } else {
            Err(format!("text 또는 json이어야 합니다: {}", s))
        }
    }
}

/// 로그 출력 대상. `stdout` 이외의 값은 파일 경로로 취급합니다.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(from = "String")]
pub enum LogOutput {
    #[default]
    Stdout,
    File(String),
}

impl From<String> for LogOutput {
    fn from(value: String) -> Self {
        if value.eq_ignore_ascii_case("stdout") {
            LogOutput::Stdout
        } else {
            LogOutput::File(value)
        }
    }
}

impl FromStr for LogOutput {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.to_string().into())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    #[serde(default)]
    pub format: LogFormat,

    #[serde(default = "default_level", deserialize_with = "deserialize_level")]
    pub level: Level,

    #[serde(default)]
    pub output: LogOutput,
}

fn default_level() -> Level {
    Level::INFO
}

fn deserialize_level<'de, D>(deserializer: D) -> Result<Level, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse()
        .map_err(|_| de::Error::custom(format!("유효하지 않은 로그 레벨: {}", raw)))
}

impl LogSettings {
    /// `CHAIN_LOG_FORMAT`, `CHAIN_LOG_LEVEL`, `CHAIN_LOG_OUTPUT`에서 읽습니다.
    pub fn from_env() -> Result<Self, SettingsError> {
        Ok(Self {
            format: parse_env_var("CHAIN_LOG_FORMAT", LogFormat::default)?,
            level: parse_env_var("CHAIN_LOG_LEVEL", default_level)?,
            output: parse_env_var("CHAIN_LOG_OUTPUT", LogOutput::default)?,
        })
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: default_level(),
            output: LogOutput::default(),
        }
    }
}
