//! Client for the authkey.io-style SMS gateway.
//!
//! The gateway is a plain HTTP GET endpoint taking the API key, recipient
//! number, country code and templated parameters as query params. Delivery
//! outcomes are inconsistent across providers, so success is judged by HTTP
//! status first and body heuristics second.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct AuthkeyOptions {
    pub api_key: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct AuthkeyService {
    options: AuthkeyOptions,
    client: Client,
}

impl AuthkeyService {
    pub fn new(options: AuthkeyOptions) -> Self {
        Self {
            options,
            client: Client::new(),
        }
    }

    /// Send a templated OTP SMS.
    ///
    /// `params` are template substitutions (e.g. `OTP` -> the code) and `sid`
    /// the provider-side template id. Returns whether the gateway accepted
    /// the message; transport errors are logged and reported as not-sent,
    /// never as a panic or a hard error.
    pub async fn send_otp(
        &self,
        mobile: &str,
        country_code: &str,
        params: &HashMap<String, String>,
        sid: Option<&str>,
    ) -> bool {
        let mut query: Vec<(String, String)> = vec![
            ("authkey".to_string(), self.options.api_key.clone()),
            ("mobile".to_string(), mobile.to_string()),
            ("country_code".to_string(), country_code.to_string()),
        ];
        for (key, value) in params {
            query.push((key.clone(), value.clone()));
        }
        if let Some(sid) = sid {
            query.push(("sid".to_string(), sid.to_string()));
        }

        self.dispatch(&query).await
    }

    /// Request OTP delivery via a voice call instead of SMS.
    pub async fn send_otp_via_call(
        &self,
        mobile: &str,
        country_code: &str,
        voice: Option<&str>,
    ) -> bool {
        let mut query: Vec<(String, String)> = vec![
            ("authkey".to_string(), self.options.api_key.clone()),
            ("mobile".to_string(), mobile.to_string()),
            ("country_code".to_string(), country_code.to_string()),
        ];
        if let Some(voice) = voice {
            query.push(("voice".to_string(), voice.to_string()));
        }

        self.dispatch(&query).await
    }

    async fn dispatch(&self, query: &[(String, String)]) -> bool {
        let res = self
            .client
            .get(&self.options.base_url)
            .query(query)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await;

        let response = match res {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "SMS gateway request failed");
                return false;
            }
        };

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        // Truncated body only; the full payload can echo recipient numbers.
        debug!(status, body = %body.chars().take(1000).collect::<String>(), "SMS gateway response");

        if status == 200 || status == 201 {
            return true;
        }

        match serde_json::from_str::<Value>(&body) {
            Ok(value) => is_success_body(&value),
            Err(_) => is_success_text(&body),
        }
    }
}

/// Heuristic success check for plain-text gateway responses.
fn is_success_text(body: &str) -> bool {
    let s = body.to_lowercase();
    s.contains("ok") || s.contains("success") || s.contains("queued")
}

/// Heuristic success check for structured gateway responses.
///
/// Providers disagree on shape: some return `status: "success"`, some
/// `error: 0`, some a nested `data` object. Accept the common patterns.
fn is_success_body(body: &Value) -> bool {
    if let Some(s) = body.as_str() {
        return is_success_text(s);
    }

    let Some(obj) = body.as_object() else {
        return false;
    };

    if let Some(status) = obj.get("status").and_then(Value::as_str) {
        let s = status.to_lowercase();
        if s == "success" || s == "sent" || s == "ok" {
            return true;
        }
    }

    if let Some(error) = obj.get("error") {
        if error.as_i64() == Some(0) || error.as_str().map(|s| s == "0").unwrap_or(false) {
            return true;
        }
    }

    if let Some(kind) = obj.get("type").and_then(Value::as_str) {
        if kind.eq_ignore_ascii_case("success") {
            return true;
        }
    }

    if let Some(code) = obj.get("code").and_then(Value::as_i64) {
        if (200..300).contains(&code) {
            return true;
        }
    }

    if let Some(data) = obj.get("data").and_then(Value::as_object) {
        if data.get("success") == Some(&Value::Bool(true))
            || data.get("sent") == Some(&Value::Bool(true))
        {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_text_success() {
        assert!(is_success_text("OK"));
        assert!(is_success_text("message queued for delivery"));
        assert!(is_success_text("Success"));
        assert!(!is_success_text("rejected: invalid number"));
    }

    #[test]
    fn test_status_field() {
        assert!(is_success_body(&json!({ "status": "success" })));
        assert!(is_success_body(&json!({ "status": "Sent" })));
        assert!(is_success_body(&json!({ "status": "ok" })));
        assert!(!is_success_body(&json!({ "status": "failed" })));
    }

    #[test]
    fn test_error_zero_means_success() {
        assert!(is_success_body(&json!({ "error": 0 })));
        assert!(is_success_body(&json!({ "error": "0" })));
        assert!(!is_success_body(&json!({ "error": 7 })));
    }

    #[test]
    fn test_numeric_code() {
        assert!(is_success_body(&json!({ "code": 200 })));
        assert!(is_success_body(&json!({ "code": 201 })));
        assert!(!is_success_body(&json!({ "code": 403 })));
    }

    #[test]
    fn test_nested_data_flags() {
        assert!(is_success_body(&json!({ "data": { "success": true } })));
        assert!(is_success_body(&json!({ "data": { "sent": true } })));
        assert!(!is_success_body(&json!({ "data": { "sent": false } })));
    }

    #[test]
    fn test_type_field() {
        assert!(is_success_body(&json!({ "type": "SUCCESS" })));
        assert!(!is_success_body(&json!({ "type": "error" })));
    }

    #[test]
    fn test_string_body_as_json() {
        assert!(is_success_body(&json!("queued")));
        assert!(!is_success_body(&json!(42)));
        assert!(!is_success_body(&json!(null)));
    }
}
