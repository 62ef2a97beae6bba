use std::fmt;

/// 라우트 등록 관련 에러
#[derive(Debug, PartialEq)]
pub enum RoutingError {
    /// 잘못된 경로 패턴
    InvalidPathPattern {
        pattern: String,
        reason: String,
    },
    /// 같은 메서드와 패턴이 이미 등록됨
    DuplicateRoute {
        method: String,
        pattern: String,
    },
}

impl fmt::Display for RoutingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingError::InvalidPathPattern { pattern, reason } =>
                write!(f, "잘못된 경로 패턴: {} ({})", pattern, reason),
            RoutingError::DuplicateRoute { method, pattern } =>
                write!(f, "이미 등록된 라우트: {} {}", method, pattern),
        }
    }
}

impl std::error::Error for RoutingError {}
