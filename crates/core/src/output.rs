use crate::error::AppError;
use serde::Serialize;
use serde_json::Value;

pub const ENVELOPE_VERSION: &str = "1.0";

#[derive(Debug, Serialize)]
pub struct Response {
    pub version: &'static str,
    pub ok: bool,
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorPayload>,
}

#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_detail: Option<String>,
}

impl Response {
    pub fn ok(command: impl Into<String>, data: Value) -> Self {
        Self {
            version: ENVELOPE_VERSION,
            ok: true,
            command: command.into(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(command: impl Into<String>, payload: ErrorPayload) -> Self {
        Self {
            version: ENVELOPE_VERSION,
            ok: false,
            command: command.into(),
            data: None,
            error: Some(payload),
        }
    }
}

impl ErrorPayload {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            platform_detail: None,
        }
    }
}

impl From<&AppError> for ErrorPayload {
    fn from(e: &AppError) -> Self {
        let mut payload = ErrorPayload::new(e.code(), e.to_string());
        payload.suggestion = e.suggestion().map(String::from);
        if let AppError::Adapter(a) = e {
            payload.platform_detail = a.platform_detail.clone();
        }
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdapterError;
    use serde_json::json;

    #[test]
    fn ok_envelope_omits_error() {
        let v = serde_json::to_value(Response::ok("list-apps", json!({ "count": 0 }))).unwrap();
        assert_eq!(v, json!({
            "version": "1.0",
            "ok": true,
            "command": "list-apps",
            "data": { "count": 0 }
        }));
    }

    #[test]
    fn err_envelope_carries_code_and_suggestion() {
        let e = AppError::from(AdapterError::not_running(500));
        let v = serde_json::to_value(Response::err("find", ErrorPayload::from(&e))).unwrap();
        assert_eq!(v["ok"], false);
        assert!(v.get("data").is_none());
        assert_eq!(v["error"]["code"], "APP_NOT_FOUND");
        assert_eq!(v["error"]["message"], "No such application running.");
        assert!(v["error"]["suggestion"].is_string());
        assert_eq!(v["error"]["platform_detail"], "gave up after 500ms");
    }
}
