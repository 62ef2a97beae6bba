use bytes::Bytes;
use serde_json::{Map, Value};

use crate::router::Params;

/// 파싱된 JSON 객체 또는 쿼리 파라미터를 담는 범용 맵
pub type JsonMap = Map<String, Value>;

/// 컨텍스트에 저장할 수 있는 값
///
/// 타입을 닫힌 열거형으로 제한해서, 읽는 쪽이 기대한 타입과 다르면
/// 조용히 기본값으로 바꾸지 않고 [`ContextError::TypeMismatch`]로 드러냅니다.
///
/// [`ContextError::TypeMismatch`]: super::ContextError::TypeMismatch
#[derive(Debug, Clone, PartialEq)]
pub enum ContextValue {
    Bool(bool),
    Str(String),
    Strings(Vec<String>),
    Json(JsonMap),
    Bytes(Bytes),
    Params(Params),
}

impl ContextValue {
    /// 에러 메시지에 사용하는 타입 이름
    pub fn kind(&self) -> &'static str {
        match self {
            ContextValue::Bool(_) => "bool",
            ContextValue::Str(_) => "string",
            ContextValue::Strings(_) => "string list",
            ContextValue::Json(_) => "json map",
            ContextValue::Bytes(_) => "bytes",
            ContextValue::Params(_) => "router params",
        }
    }
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        ContextValue::Bool(value)
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        ContextValue::Str(value)
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        ContextValue::Str(value.to_string())
    }
}

impl From<Vec<String>> for ContextValue {
    fn from(value: Vec<String>) -> Self {
        ContextValue::Strings(value)
    }
}

impl From<JsonMap> for ContextValue {
    fn from(value: JsonMap) -> Self {
        ContextValue::Json(value)
    }
}

impl From<Bytes> for ContextValue {
    fn from(value: Bytes) -> Self {
        ContextValue::Bytes(value)
    }
}

impl From<Params> for ContextValue {
    fn from(value: Params) -> Self {
        ContextValue::Params(value)
    }
}
