use std::fmt;

/// 요청 컨텍스트에 값을 저장할 때 사용하는 키
///
/// 키는 이름으로 비교됩니다. 서로 다른 관심사는 서로 다른 이름을 사용해야 합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextKey(&'static str);

impl ContextKey {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// 라우트 인가 여부 (bool)
pub const ROUTE_AUTHORIZED: ContextKey = ContextKey::new("routeAuthorized");

/// 라우터가 추출한 경로 파라미터
pub const ROUTER_PARAMS: ContextKey = ContextKey::new("httpRouterParams");

/// 파싱된 JSON 본문 (또는 GET 쿼리 파라미터) 맵
pub const REQUEST_JSON: ContextKey = ContextKey::new("reqJsonStruct");

/// 한 번만 읽은 원본 요청 본문
pub const REQUEST_BODY: ContextKey = ContextKey::new("reqBodyBytes");

/// 경로에서 꺼낸 리소스 id
pub const REQUEST_ID_PARAM: ContextKey = ContextKey::new("reqIdParam");

/// 추출된 인증 토큰
pub const TOKEN: ContextKey = ContextKey::new("ctxToken");

/// 토큰 검증 후 식별된 사용자
pub const TOKEN_USER_IDENT: ContextKey = ContextKey::new("ctxTokenUserIdent");

/// 사용자에게 부여된 권한 식별자 목록
pub const AUTHORIZATIONS: ContextKey = ContextKey::new("ctxAuthorizations");

pub const NAMESPACE: ContextKey = ContextKey::new("ctxNamespace");
