use std::any::Any;

use axum::{
    body::{boxed, Full},
    http::{header, StatusCode},
    response::Response,
};
use tracing::{event, Level};

pub fn handle_panic(production: bool, err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic message".to_string()
    };

    event!(Level::ERROR, %details, "request handler panicked");

    let body = if production {
        serde_json::json!({ "error": { "kind": "internal_server_error", "message": "Server error" } })
    } else {
        serde_json::json!({
            "error": {
                "kind": "panic",
                "message": details,
            }
        })
    };

    let mut res = Response::new(boxed(Full::from(body.to_string())));
    *res.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    res.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    res
}
