//! 요청 단위 컨텍스트 저장소
//!
//! 미들웨어 사이에서 파싱된 본문, 토큰, 라우터 파라미터, 인가 결과 같은 값을
//! 전달합니다. 저장소는 `Arc` 노드로 이어진 불변 연결 리스트이며, 값을 추가하면
//! 새 노드가 앞에 붙을 뿐 기존 노드는 바뀌지 않습니다. 따라서 이전에 복제해 둔
//! [`Context`] 스냅샷은 이후의 쓰기를 보지 못합니다.
//!
//! ```
//! use adapter_chain::context::{Context, keys};
//!
//! let base = Context::new();
//! let extended = base.with_value(keys::TOKEN, "abc123");
//!
//! assert_eq!(extended.get_str(&keys::TOKEN).unwrap(), "abc123");
//! assert_eq!(base.get_str(&keys::TOKEN).unwrap(), "");
//! ```

mod error;
mod key;
mod value;

pub mod keys {
    pub use super::key::{
        AUTHORIZATIONS, NAMESPACE, REQUEST_BODY, REQUEST_ID_PARAM, REQUEST_JSON, ROUTER_PARAMS,
        ROUTE_AUTHORIZED, TOKEN, TOKEN_USER_IDENT,
    };
}

pub use error::ContextError;
pub use key::ContextKey;
pub use value::{ContextValue, JsonMap};

use bytes::Bytes;
use std::sync::Arc;

use crate::router::Params;

#[derive(Debug)]
struct Entry {
    key: ContextKey,
    value: ContextValue,
    parent: Option<Arc<Entry>>,
}

/// 복제 비용이 싼 불변 키/값 체인
#[derive(Debug, Clone, Default)]
pub struct Context {
    head: Option<Arc<Entry>>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// 값을 하나 더 얹은 새 컨텍스트를 반환합니다. `self`는 변경되지 않습니다.
    pub fn with_value(&self, key: ContextKey, value: impl Into<ContextValue>) -> Self {
        Self {
            head: Some(Arc::new(Entry {
                key,
                value: value.into(),
                parent: self.head.clone(),
            })),
        }
    }

    /// 가장 최근에 `key`로 저장된 값을 찾습니다.
    pub fn get(&self, key: &ContextKey) -> Option<&ContextValue> {
        let mut cursor = self.head.as_deref();
        while let Some(entry) = cursor {
            if entry.key == *key {
                return Some(&entry.value);
            }
            cursor = entry.parent.as_deref();
        }
        None
    }

    pub fn contains(&self, key: &ContextKey) -> bool {
        self.get(key).is_some()
    }

    /// 체인에 쌓인 항목 수 (같은 키의 이전 값 포함)
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut cursor = self.head.as_deref();
        while let Some(entry) = cursor {
            count += 1;
            cursor = entry.parent.as_deref();
        }
        count
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// 문자열 값을 읽습니다. 값이 없으면 빈 문자열을 반환합니다.
    pub fn get_str(&self, key: &ContextKey) -> Result<&str, ContextError> {
        match self.get(key) {
            None => Ok(""),
            Some(ContextValue::Str(value)) => Ok(value),
            Some(other) => Err(mismatch(key, "string", other)),
        }
    }

    pub fn get_bool(&self, key: &ContextKey) -> Result<Option<bool>, ContextError> {
        match self.get(key) {
            None => Ok(None),
            Some(ContextValue::Bool(value)) => Ok(Some(*value)),
            Some(other) => Err(mismatch(key, "bool", other)),
        }
    }

    pub fn get_strings(&self, key: &ContextKey) -> Result<Option<&[String]>, ContextError> {
        match self.get(key) {
            None => Ok(None),
            Some(ContextValue::Strings(values)) => Ok(Some(values)),
            Some(other) => Err(mismatch(key, "string list", other)),
        }
    }

    pub fn get_json(&self, key: &ContextKey) -> Result<Option<&JsonMap>, ContextError> {
        match self.get(key) {
            None => Ok(None),
            Some(ContextValue::Json(map)) => Ok(Some(map)),
            Some(other) => Err(mismatch(key, "json map", other)),
        }
    }

    pub fn get_bytes(&self, key: &ContextKey) -> Result<Option<&Bytes>, ContextError> {
        match self.get(key) {
            None => Ok(None),
            Some(ContextValue::Bytes(bytes)) => Ok(Some(bytes)),
            Some(other) => Err(mismatch(key, "bytes", other)),
        }
    }

    pub fn get_params(&self, key: &ContextKey) -> Result<Option<&Params>, ContextError> {
        match self.get(key) {
            None => Ok(None),
            Some(ContextValue::Params(params)) => Ok(Some(params)),
            Some(other) => Err(mismatch(key, "router params", other)),
        }
    }
}

fn mismatch(key: &ContextKey, expected: &'static str, found: &ContextValue) -> ContextError {
    ContextError::TypeMismatch {
        key: *key,
        expected,
        found: found.kind(),
    }
}
