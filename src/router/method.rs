use super::RouteError;
use serde_json::Value;

/// Methods that the router dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Balance,
    CreateWallet,
    SendToHouse,
    SendToUser,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Balance => "balance",
            Method::CreateWallet => "create-wallet",
            Method::SendToHouse => "send_to_house",
            Method::SendToUser => "send_to_user",
        }
    }
}

impl TryFrom<&str> for Method {
    type Error = RouteError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "balance" => Ok(Method::Balance),
            "create-wallet" => Ok(Method::CreateWallet),
            "send_to_house" => Ok(Method::SendToHouse),
            "send_to_user" => Ok(Method::SendToUser),
            _ => Err(RouteError::NotFound),
        }
    }
}

impl TryFrom<&Value> for Method {
    type Error = RouteError;

    /// Non-string methods never match a route.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value
            .as_str()
            .ok_or(RouteError::NotFound)
            .and_then(Method::try_from)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_method() {
        for method in [
            Method::Balance,
            Method::CreateWallet,
            Method::SendToHouse,
            Method::SendToUser,
        ] {
            assert_eq!(Method::try_from(method.as_str()).unwrap(), method);
        }
    }

    #[test]
    fn test_exact_match_only() {
        for method in ["Balance", "create_wallet", "send-to-house", " balance", ""] {
            assert!(matches!(
                Method::try_from(method),
                Err(RouteError::NotFound)
            ));
        }
        assert!(matches!(
            Method::try_from(&json!(42)),
            Err(RouteError::NotFound)
        ));
    }
}
