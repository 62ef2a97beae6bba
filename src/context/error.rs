use super::ContextKey;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ContextError {
    #[error("컨텍스트 값 {key} 타입 불일치: 기대={expected}, 실제={found}")]
    TypeMismatch {
        key: ContextKey,
        expected: &'static str,
        found: &'static str,
    },

    #[error("no parameters in context")]
    NoParams,
}
