//! Per-method request bodies, validated out of the resolved event body.

use super::RouteError;
use serde_json::Value;

/// Returns the field as a non-empty string, if it is one.
fn non_empty_str<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

/// Coerces an amount to a number.
///
/// Accepts finite JSON numbers, and strings that hold a finite decimal number once trimmed.
/// Everything else, including `null` and booleans, is not numeric.
pub fn numeric_amount(value: Option<&Value>) -> Option<f64> {
    let amount = match value? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() {
                None
            } else {
                text.parse::<f64>().ok()
            }
        }
        _ => None,
    }?;

    amount.is_finite().then_some(amount)
}

#[derive(Debug, Clone, PartialEq)]
pub struct BalanceRequest {
    pub address: String,
}

impl TryFrom<&Value> for BalanceRequest {
    type Error = RouteError;

    fn try_from(body: &Value) -> Result<Self, Self::Error> {
        let address = non_empty_str(body, "address")
            .ok_or(RouteError::BadRequest("Missing or invalid 'address'"))?;

        Ok(Self {
            address: address.to_string(),
        })
    }
}

#[derive(Clone, PartialEq)]
pub struct SendToHouseRequest {
    pub from_mnemonic: String,
    pub amount: f64,
}

impl std::fmt::Debug for SendToHouseRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SendToHouseRequest")
            .field("from_mnemonic", &"<redacted>")
            .field("amount", &self.amount)
            .finish()
    }
}

impl TryFrom<&Value> for SendToHouseRequest {
    type Error = RouteError;

    fn try_from(body: &Value) -> Result<Self, Self::Error> {
        const INVALID: RouteError = RouteError::BadRequest("Invalid mnemonic or bid amount");

        let from_mnemonic = non_empty_str(body, "fromMnemonic").ok_or(INVALID)?;
        let amount = numeric_amount(body.get("amount")).ok_or(INVALID)?;

        Ok(Self {
            from_mnemonic: from_mnemonic.to_string(),
            amount,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SendToUserRequest {
    pub to_address: String,
    pub amount: f64,
}

impl TryFrom<&Value> for SendToUserRequest {
    type Error = RouteError;

    fn try_from(body: &Value) -> Result<Self, Self::Error> {
        const INVALID: RouteError = RouteError::BadRequest("Invalid toAddress or bid amount");

        let to_address = non_empty_str(body, "toAddress").ok_or(INVALID)?;
        let amount = numeric_amount(body.get("amount")).ok_or(INVALID)?;

        Ok(Self {
            to_address: to_address.to_string(),
            amount,
        })
    }
}
