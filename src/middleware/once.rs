use async_trait::async_trait;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Once};
use tracing::{debug, error};

use crate::middleware::{Handler, Middleware, MiddlewareError};
use crate::request::Request;
use crate::response::ResponseWriter;

type SetupFn = dyn Fn(&mut ResponseWriter, &Request) + Send + Sync;

/// 설정 함수를 최초 한 번만 실행하고, 매 요청은 그대로 다음 핸들러로 넘깁니다.
///
/// 래치는 이 값(과 그 복제본)이 소유합니다. 같은 `CallOnce`를 여러 체인에 넣으면
/// 모든 체인을 통틀어 한 번만 실행되고, 새로 만든 `CallOnce`는 별도의 래치를 가집니다.
/// 동시에 처음 도착한 요청들은 설정 함수가 끝날 때까지 기다립니다.
///
/// 설정 함수가 패닉하더라도 래치는 완료된 것으로 남습니다. 그 요청만 500으로 끝나고,
/// 이후 요청은 설정을 다시 실행하지 않고 다음 핸들러로 넘어갑니다.
#[derive(Clone)]
pub struct CallOnce {
    once: Arc<Once>,
    setup: Arc<SetupFn>,
}

impl CallOnce {
    pub fn new<F>(setup: F) -> Self
    where
        F: Fn(&mut ResponseWriter, &Request) + Send + Sync + 'static,
    {
        Self {
            once: Arc::new(Once::new()),
            setup: Arc::new(setup),
        }
    }

    pub fn has_run(&self) -> bool {
        self.once.is_completed()
    }
}

#[async_trait]
impl Middleware for CallOnce {
    fn name(&self) -> &str {
        "call-once"
    }

    async fn handle(
        &self,
        w: &mut ResponseWriter,
        req: Request,
        next: &dyn Handler,
    ) -> Result<(), MiddlewareError> {
        let mut outcome = Ok(());
        self.once.call_once(|| {
            debug!("최초 1회 설정 실행");
            outcome = catch_unwind(AssertUnwindSafe(|| (self.setup)(w, &req)));
        });

        if let Err(panic) = outcome {
            let message = panic_message(panic.as_ref());
            error!(error = %message, "최초 1회 설정 중 패닉");
            return Err(MiddlewareError::SetupPanicked(message));
        }

        next.serve(w, req).await;
        Ok(())
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "알 수 없는 패닉".to_string()
    }
}
