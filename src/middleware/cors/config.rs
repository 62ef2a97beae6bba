use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CorsConfig {
    /// 허용할 Origin. 비어 있으면 요청의 Origin을 그대로 돌려줍니다.
    #[serde(default)]
    pub domain: String,

    /// 추가로 허용할 요청 헤더 (`Content-Type`은 항상 포함)
    #[serde(default)]
    pub allow_headers: Vec<String>,
}

impl CorsConfig {
    pub fn new(domain: impl Into<String>, allow_headers: &[&str]) -> Self {
        Self {
            domain: domain.into(),
            allow_headers: allow_headers.iter().map(|h| h.to_string()).collect(),
        }
    }

    /// 요청 Origin을 반사하는 설정
    pub fn reflect_origin() -> Self {
        Self::default()
    }

    /// 쉼표로 구분된 헤더 목록을 파싱합니다.
    pub fn parse_header_list(value: &str) -> Vec<String> {
        value.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// `Access-Control-Allow-Headers` 값. 설정된 헤더 뒤에 `Content-Type`을 붙입니다.
    pub fn allow_headers_value(&self) -> String {
        let mut headers = self.allow_headers.clone();
        if !headers.iter().any(|h| h.eq_ignore_ascii_case("content-type")) {
            headers.push("Content-Type".to_string());
        }
        headers.join(", ")
    }
}
