use crate::{
    configurations::HouseAccounts,
    ledger::{Ledger, TransferRequest},
};
use serde_json::{json, Value};

mod envelope;
pub use envelope::ResponseEnvelope;

mod errors;
pub use errors::RouteError;

mod method;
pub use method::Method;

mod requests;
pub use requests::{numeric_amount, BalanceRequest, SendToHouseRequest, SendToUserRequest};

/// Routes invocation events to the ledger.
pub struct Router<L> {
    house: HouseAccounts,
    ledger: L,
}

impl<L: Ledger> Router<L> {
    pub fn new(house: HouseAccounts, ledger: L) -> Self {
        Self { house, ledger }
    }

    /// Returns the underlying ledger.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Handles an invocation event, always returning an envelope.
    ///
    /// The event is `{ method, body }` where `body` is either a JSON-encoded string or an object.
    /// When `body` is absent, the event itself is used as the body.
    pub async fn handle(&self, event: &Value) -> ResponseEnvelope {
        match self.route(event).await {
            Ok(body) => ResponseEnvelope::ok(&body),
            Err(err) => {
                match &err {
                    RouteError::Downstream(report) => log::error!("Request failed: {:#}", report),
                    err => log::debug!("Request rejected: {}", err),
                }
                err.into_envelope()
            }
        }
    }

    async fn route(&self, event: &Value) -> Result<Value, RouteError> {
        let body = resolve_body(event)?;

        let method = match event.get("method") {
            None | Some(Value::Null) => None,
            Some(Value::String(method)) if method.is_empty() => None,
            Some(method) => Some(method),
        };
        let (Some(method), Some(body)) = (method, body) else {
            return Err(RouteError::BadRequest("Missing method or body"));
        };

        let method = Method::try_from(method)?;
        log::info!("Handling {}", method);

        match method {
            Method::Balance => self.balance(&body).await,
            Method::CreateWallet => self.create_wallet().await,
            Method::SendToHouse => self.send_to_house(&body).await,
            Method::SendToUser => self.send_to_user(&body).await,
        }
    }

    async fn balance(&self, body: &Value) -> Result<Value, RouteError> {
        let request = BalanceRequest::try_from(body)?;
        let balance = self.ledger.balance(&request.address).await?;

        Ok(json!({ "address": request.address, "balance": balance }))
    }

    async fn create_wallet(&self) -> Result<Value, RouteError> {
        let wallet = self.ledger.create_wallet().await?;
        let test_wallet = serde_json::to_string_pretty(&wallet).map_err(eyre::Report::from)?;

        Ok(json!({ "testWallet": test_wallet }))
    }

    async fn send_to_house(&self, body: &Value) -> Result<Value, RouteError> {
        let request = SendToHouseRequest::try_from(body)?;
        let result = self
            .ledger
            .transfer(TransferRequest {
                from_mnemonic: request.from_mnemonic,
                to_address: self.house.address.clone(),
                amount: request.amount,
            })
            .await?;

        Ok(serde_json::to_value(result).map_err(eyre::Report::from)?)
    }

    async fn send_to_user(&self, body: &Value) -> Result<Value, RouteError> {
        let request = SendToUserRequest::try_from(body)?;
        let result = self
            .ledger
            .transfer(TransferRequest {
                from_mnemonic: self.house.mnemonic.clone(),
                to_address: request.to_address,
                amount: request.amount,
            })
            .await?;

        Ok(serde_json::to_value(result).map_err(eyre::Report::from)?)
    }
}

/// Resolves the body of an event.
///
/// - A string body is parsed as JSON, failing with `400` if it is not valid JSON.
/// - An object body is used as is.
/// - A missing, `null` or empty-string body falls back to the event itself.
///
/// Returns `None` if the resolved body is `null`.
fn resolve_body(event: &Value) -> Result<Option<Value>, RouteError> {
    let body = match event.get("body") {
        None | Some(Value::Null) => event.clone(),
        Some(Value::String(raw)) if raw.is_empty() => event.clone(),
        Some(Value::String(raw)) => serde_json::from_str(raw)
            .map_err(|_| RouteError::BadRequest("Invalid JSON body"))?,
        Some(body) => body.clone(),
    };

    Ok((!body.is_null()).then_some(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_string_body() {
        let event = json!({ "method": "balance", "body": "{\"address\":\"0xabc\"}" });
        let body = resolve_body(&event).unwrap().unwrap();
        assert_eq!(body, json!({ "address": "0xabc" }));
    }

    #[test]
    fn test_resolve_object_body() {
        let event = json!({ "method": "balance", "body": { "address": "0xabc" } });
        let body = resolve_body(&event).unwrap().unwrap();
        assert_eq!(body, json!({ "address": "0xabc" }));
    }

    #[test]
    fn test_resolve_direct_invocation() {
        let event = json!({ "method": "balance", "address": "0xabc" });
        assert_eq!(resolve_body(&event).unwrap().unwrap(), event);

        let event = json!({ "method": "balance", "address": "0xabc", "body": "" });
        assert_eq!(resolve_body(&event).unwrap().unwrap(), event);
    }

    #[test]
    fn test_resolve_invalid_json() {
        let event = json!({ "method": "balance", "body": "{not json" });
        let err = resolve_body(&event).unwrap_err();
        assert_eq!(err.to_string(), "Invalid JSON body");
    }

    #[test]
    fn test_resolve_null_body() {
        let event = json!({ "method": "balance", "body": "null" });
        assert!(resolve_body(&event).unwrap().is_none());
    }
}
