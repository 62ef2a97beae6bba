use crate::router::{Params, RoutingError};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Segment {
    Static(String),
    /// `:name` - 한 세그먼트 전체
    Param(String),
    /// `*name` - 나머지 경로 전체 (선행 `/` 포함), 마지막에만 허용
    CatchAll(String),
}

/// 라우트 경로 패턴
///
/// `/items/:id`, `/files/*path` 형식을 지원합니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathPattern {
    pub pattern: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Result<Self, RoutingError> {
        let invalid = |reason: &str| RoutingError::InvalidPathPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        let rest = pattern
            .strip_prefix('/')
            .ok_or_else(|| invalid("패턴은 '/'로 시작해야 합니다"))?;

        let raw: Vec<&str> = rest.split('/').collect();
        let mut segments = Vec::with_capacity(raw.len());
        let mut names: Vec<&str> = Vec::new();

        for (index, part) in raw.iter().enumerate() {
            let segment = if let Some(name) = part.strip_prefix(':') {
                if name.is_empty() {
                    return Err(invalid("파라미터 이름이 비어 있습니다"));
                }
                names.push(name);
                Segment::Param(name.to_string())
            } else if let Some(name) = part.strip_prefix('*') {
                if name.is_empty() {
                    return Err(invalid("catch-all 이름이 비어 있습니다"));
                }
                if index != raw.len() - 1 {
                    return Err(invalid("catch-all은 마지막 세그먼트여야 합니다"));
                }
                names.push(name);
                Segment::CatchAll(name.to_string())
            } else {
                Segment::Static(part.to_string())
            };
            segments.push(segment);
        }

        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        if sorted.len() != names.len() {
            return Err(invalid("파라미터 이름이 중복되었습니다"));
        }

        Ok(Self {
            pattern: pattern.to_string(),
            segments,
        })
    }

    /// 경로가 패턴과 일치하면 추출한 파라미터를 반환합니다.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let rest = path.strip_prefix('/')?;
        let parts: Vec<&str> = rest.split('/').collect();
        let mut params = Params::new();

        for (index, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::CatchAll(name) => {
                    if index >= parts.len() {
                        return None;
                    }
                    params.push(name.as_str(), format!("/{}", parts[index..].join("/")));
                    return Some(params);
                }
                Segment::Static(expected) => {
                    if parts.get(index) != Some(&expected.as_str()) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    let value = parts.get(index).filter(|value| !value.is_empty())?;
                    params.push(name.as_str(), *value);
                }
            }
        }

        if parts.len() == self.segments.len() {
            Some(params)
        } else {
            None
        }
    }
}
