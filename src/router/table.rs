use async_trait::async_trait;
use hyper::header::{self, HeaderValue};
use hyper::{Method, StatusCode};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::middleware::Handler;
use crate::request::Request;
use crate::response::{http_error, ResponseWriter};
use super::{Params, PathPattern, RoutingError, SharedRouteHandle};

/// 메서드와 경로 패턴으로 라우트 핸들을 찾는 라우팅 테이블
///
/// 같은 메서드 안에서는 등록 순서대로 먼저 일치하는 패턴이 이깁니다.
#[derive(Clone, Default)]
pub struct Router {
    routes: HashMap<Method, Vec<(PathPattern, SharedRouteHandle)>>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(
        &mut self,
        method: Method,
        pattern: &str,
        handle: SharedRouteHandle,
    ) -> Result<&mut Self, RoutingError> {
        let matcher = PathPattern::parse(pattern)?;
        let routes = self.routes.entry(method.clone()).or_default();
        if routes.iter().any(|(existing, _)| existing == &matcher) {
            return Err(RoutingError::DuplicateRoute {
                method: method.to_string(),
                pattern: pattern.to_string(),
            });
        }
        debug!(%method, pattern, "라우트 등록");
        routes.push((matcher, handle));
        Ok(self)
    }

    pub fn get(&mut self, pattern: &str, handle: SharedRouteHandle) -> Result<&mut Self, RoutingError> {
        self.handle(Method::GET, pattern, handle)
    }

    pub fn post(&mut self, pattern: &str, handle: SharedRouteHandle) -> Result<&mut Self, RoutingError> {
        self.handle(Method::POST, pattern, handle)
    }

    pub fn put(&mut self, pattern: &str, handle: SharedRouteHandle) -> Result<&mut Self, RoutingError> {
        self.handle(Method::PUT, pattern, handle)
    }

    pub fn patch(&mut self, pattern: &str, handle: SharedRouteHandle) -> Result<&mut Self, RoutingError> {
        self.handle(Method::PATCH, pattern, handle)
    }

    pub fn delete(&mut self, pattern: &str, handle: SharedRouteHandle) -> Result<&mut Self, RoutingError> {
        self.handle(Method::DELETE, pattern, handle)
    }

    pub fn options(&mut self, pattern: &str, handle: SharedRouteHandle) -> Result<&mut Self, RoutingError> {
        self.handle(Method::OPTIONS, pattern, handle)
    }

    /// 요청 메서드와 경로에 맞는 라우트를 찾습니다.
    pub fn lookup(&self, method: &Method, path: &str) -> Option<(SharedRouteHandle, Params)> {
        self.routes.get(method)?.iter().find_map(|(matcher, handle)| {
            matcher.matches(path).map(|params| (handle.clone(), params))
        })
    }

    /// 경로가 일치하는 메서드 목록 (이름순)
    ///
    /// OPTIONS 라우트만 일치하는 경로는 빈 목록입니다. 다른 메서드가 있을 때만 함께 나열됩니다.
    pub fn allowed_methods(&self, path: &str) -> Vec<Method> {
        let matches = |routes: &Vec<(PathPattern, SharedRouteHandle)>| {
            routes.iter().any(|(matcher, _)| matcher.matches(path).is_some())
        };

        let mut allowed: Vec<Method> = self
            .routes
            .iter()
            .filter(|(method, routes)| **method != Method::OPTIONS && matches(routes))
            .map(|(method, _)| method.clone())
            .collect();
        if allowed.is_empty() {
            return allowed;
        }

        if self.routes.get(&Method::OPTIONS).is_some_and(|routes| matches(routes)) {
            allowed.push(Method::OPTIONS);
        }
        allowed.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        allowed
    }
}

#[async_trait]
impl Handler for Router {
    async fn serve(&self, w: &mut ResponseWriter, req: Request) {
        let path = req.uri().path().to_string();
        let found = self.lookup(req.method(), &path);
        if let Some((handle, params)) = found {
            return handle.call(w, req, params).await;
        }

        let allowed = self.allowed_methods(&path);
        if allowed.is_empty() {
            debug!(method = %req.method(), path = %path, "일치하는 라우트 없음");
            http_error(w, "404 page not found", StatusCode::NOT_FOUND);
            return;
        }

        let allow = allowed.iter().map(Method::as_str).collect::<Vec<_>>().join(", ");
        match HeaderValue::from_str(&allow) {
            Ok(value) => {
                w.headers_mut().insert(header::ALLOW, value);
            }
            Err(e) => warn!(error = %e, "Allow 헤더 생성 실패"),
        }
        http_error(w, "Method Not Allowed", StatusCode::METHOD_NOT_ALLOWED);
    }
}
