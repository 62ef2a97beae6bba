use serde::Deserialize;
use std::env;
use std::fmt::Display;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use super::SettingsError;

/// 데모 서버가 바인딩할 주소
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub http_port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            http_port: 8080,
        }
    }
}

fn invalid_var(name: &str, value: &str, reason: impl Display) -> SettingsError {
    SettingsError::EnvVarInvalid {
        var_name: name.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// 환경 변수 `name`을 `T`로 파싱합니다. 설정되지 않았으면 `default()`를 씁니다.
pub fn parse_env_var<T, F>(name: &str, default: F) -> Result<T, SettingsError>
where
    T: FromStr,
    T::Err: Display,
    F: FnOnce() -> T,
{
    let raw = match env::var(name) {
        Ok(raw) => raw,
        Err(env::VarError::NotPresent) => return Ok(default()),
        Err(env::VarError::NotUnicode(raw)) => {
            return Err(invalid_var(name, &raw.to_string_lossy(), "UTF-8이 아닌 값"));
        }
    };
    raw.parse().map_err(|e: T::Err| invalid_var(name, &raw, e))
}

impl ServerSettings {
    /// `CHAIN_HOST`, `CHAIN_HTTP_PORT`에서 읽습니다.
    pub fn from_env() -> Result<Self, SettingsError> {
        let defaults = Self::default();
        let settings = Self {
            http_port: parse_env_var("CHAIN_HTTP_PORT", || defaults.http_port)?,
            host: parse_env_var("CHAIN_HOST", || defaults.host)?,
        };

        if settings.http_port == 0 {
            return Err(invalid_var("CHAIN_HTTP_PORT", "0", "포트는 1-65535 범위여야 합니다"));
        }
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.http_port == 0 {
            return Err(SettingsError::InvalidConfig("http_port는 0일 수 없습니다".to_string()));
        }
        self.addr().map(|_| ())
    }

    /// 바인딩할 소켓 주소. `host`는 IP 주소여야 합니다.
    pub fn addr(&self) -> Result<SocketAddr, SettingsError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|e| invalid_var("CHAIN_HOST", &self.host, e))?;
        Ok(SocketAddr::new(ip, self.http_port))
    }
}
