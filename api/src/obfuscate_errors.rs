use axum::{
    body::{Body, BoxBody},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use futures::future::BoxFuture;
use serde_json::json;
use tower::{Layer, Service};

/// Replaces the body of server and auth failures with a generic message, so internal
/// details never reach clients in production.
#[derive(Clone)]
pub struct ObfuscateErrorLayer {
    enabled: bool,
}

impl ObfuscateErrorLayer {
    pub fn new(enabled: bool) -> ObfuscateErrorLayer {
        ObfuscateErrorLayer { enabled }
    }
}

impl<S> Layer<S> for ObfuscateErrorLayer {
    type Service = ObfuscateError<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ObfuscateError {
            inner,
            enabled: self.enabled,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ObfuscateError<S> {
    inner: S,
    enabled: bool,
}

fn replacement(status: StatusCode) -> Option<(&'static str, &'static str)> {
    match status {
        StatusCode::INTERNAL_SERVER_ERROR => Some(("internal_server_error", "Internal error")),
        StatusCode::UNAUTHORIZED => Some(("authn", "Unauthorized")),
        StatusCode::FORBIDDEN => Some(("authz", "Forbidden")),
        _ => None,
    }
}

impl<S> Service<Request<Body>> for ObfuscateError<S>
where
    S: Service<Request<Body>> + Send + 'static,
    S::Future: Send + 'static,
    S::Response: IntoResponse + Send + 'static,
{
    type Response = Response<BoxBody>;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let enabled = self.enabled;
        let fut = self.inner.call(req);
        Box::pin(async move {
            let res = fut.await?.into_response();
            if !enabled {
                return Ok(res);
            }

            let status = res.status();
            let Some((kind, message)) = replacement(status) else {
                return Ok(res);
            };

            let body = json!({
                "error": {
                    "kind": kind,
                    "message": message,
                }
            });

            Ok((status, Json(body)).into_response())
        })
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use tower::{service_fn, ServiceExt};

    use super::*;

    async fn respond(enabled: bool, status: StatusCode) -> serde_json::Value {
        let inner = service_fn(move |_req: Request<Body>| async move {
            Ok::<_, Infallible>((status, "secret details").into_response())
        });
        let res = ObfuscateErrorLayer::new(enabled)
            .layer(inner)
            .oneshot(Request::new(Body::empty()))
            .await
            .unwrap();
        assert_eq!(res.status(), status);
        let bytes = hyper::body::to_bytes(res.into_body()).await.unwrap();
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| json!(String::from_utf8_lossy(&bytes).to_string()))
    }

    #[tokio::test]
    async fn hides_server_errors() {
        let body = respond(true, StatusCode::INTERNAL_SERVER_ERROR).await;
        assert_eq!(body["error"]["message"], "Internal error");
    }

    #[tokio::test]
    async fn leaves_other_errors_alone() {
        let body = respond(true, StatusCode::NOT_FOUND).await;
        assert_eq!(body, json!("secret details"));
    }

    #[tokio::test]
    async fn disabled_passes_through() {
        let body = respond(false, StatusCode::INTERNAL_SERVER_ERROR).await;
        assert_eq!(body, json!("secret details"));
    }
}
