use serde::Serialize;
use std::{borrow::Cow, collections::BTreeMap};
use tracing::{event, Level};

/// Per-field validation messages, keyed by the field name in the request payload.
pub type FieldMessages = BTreeMap<String, Vec<String>>;

#[derive(Debug, Serialize)]
pub struct ErrorResponseData {
    error: ErrorDetails,
}

#[derive(Debug, Serialize)]
struct ErrorDetails {
    kind: Cow<'static, str>,
    message: Cow<'static, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<FieldMessages>,
}

impl ErrorResponseData {
    pub fn new(
        kind: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> ErrorResponseData {
        let ret = ErrorResponseData {
            error: ErrorDetails {
                kind: kind.into(),
                message: message.into(),
                fields: None,
            },
        };

        event!(Level::ERROR, kind=%ret.error.kind, message=%ret.error.message);

        ret
    }

    pub fn with_fields(mut self, fields: FieldMessages) -> ErrorResponseData {
        event!(Level::ERROR, kind=%self.error.kind, ?fields, "field errors");
        self.error.fields = Some(fields);
        self
    }

    pub fn kind(&self) -> &str {
        &self.error.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_omitted_when_absent() {
        let data = ErrorResponseData::new("not_found", "Not found");
        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "error": { "kind": "not_found", "message": "Not found" } })
        );
    }

    #[test]
    fn fields_serialized() {
        let mut fields = FieldMessages::new();
        fields.insert(
            "password".to_string(),
            vec!["must be at least 8 characters".to_string()],
        );
        let data = ErrorResponseData::new("validation", "Invalid input").with_fields(fields);
        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(
            value["error"]["fields"]["password"][0],
            "must be at least 8 characters"
        );
        assert_eq!(data.kind(), "validation");
    }
}
