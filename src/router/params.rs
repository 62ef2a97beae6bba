/// 경로 파라미터 하나
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub key: String,
    pub value: String,
}

/// 라우터가 경로에서 추출한 파라미터 목록 (경로에 나타난 순서)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<Param>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push(Param {
            key: key.into(),
            value: value.into(),
        });
    }

    /// 이름으로 첫 번째 값을 찾습니다. 없으면 빈 문자열입니다.
    pub fn by_name(&self, name: &str) -> &str {
        self.0
            .iter()
            .find(|param| param.key == name)
            .map(|param| param.value.as_str())
            .unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = &Param> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.push(key, value);
        }
        params
    }
}
