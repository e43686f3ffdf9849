use serde::Serialize;
use serde_json::Value;

/// The `{statusCode, body}` pair returned by every invocation, where `body` is JSON-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub body: String,
}

impl ResponseEnvelope {
    pub fn new(status_code: u16, body: &Value) -> Self {
        Self {
            status_code,
            body: body.to_string(),
        }
    }

    /// A `200` envelope.
    pub fn ok(body: &Value) -> Self {
        Self::new(200, body)
    }

    /// Decodes the body back into JSON.
    pub fn json(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_serialization() {
        let envelope = ResponseEnvelope::ok(&json!({ "txId": "0x01", "round": 7 }));
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["statusCode"], 200);
        // body is a string holding JSON, not a nested object
        let body = value["body"].as_str().unwrap();
        assert_eq!(
            serde_json::from_str::<Value>(body).unwrap(),
            json!({ "txId": "0x01", "round": 7 })
        );
    }
}
