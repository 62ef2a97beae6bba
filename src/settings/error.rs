use std::fmt;

/// 설정 로드 에러
#[derive(Debug)]
pub enum SettingsError {
    /// 환경 변수 값을 해석할 수 없음
    EnvVarInvalid {
        var_name: String,
        value: String,
        reason: String,
    },
    /// 설정 파일을 읽을 수 없음
    FileError {
        path: String,
        error: std::io::Error,
    },
    /// TOML 문법 또는 필드 타입 오류
    ParseError {
        source: toml::de::Error,
    },
    InvalidConfig(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnvVarInvalid { var_name, value, reason } => {
                write!(f, "{}={:?}: {}", var_name, value, reason)
            }
            Self::FileError { path, error } => write!(f, "설정 파일 {}을(를) 읽을 수 없음: {}", path, error),
            Self::ParseError { source } => write!(f, "TOML 파싱 실패: {}", source),
            Self::InvalidConfig(msg) => write!(f, "잘못된 설정: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileError { error, .. } => Some(error),
            Self::ParseError { source } => Some(source),
            Self::EnvVarInvalid { .. } | Self::InvalidConfig(_) => None,
        }
    }
}
