use super::ResponseEnvelope;
use serde_json::json;

/// A failed invocation, mapped to a status-coded envelope by [`RouteError::into_envelope`].
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// Malformed event, or a missing/invalid field for the requested method.
    #[error("{0}")]
    BadRequest(&'static str),
    /// The method is not one of the known routes.
    #[error("Route not found")]
    NotFound,
    /// The delegate call failed.
    #[error("{0}")]
    Downstream(eyre::Report),
}

impl From<eyre::Report> for RouteError {
    fn from(report: eyre::Report) -> Self {
        Self::Downstream(report)
    }
}

impl RouteError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::NotFound => 404,
            Self::Downstream(_) => 500,
        }
    }

    pub fn into_envelope(self) -> ResponseEnvelope {
        let status_code = self.status_code();
        let body = match self {
            Self::Downstream(report) => {
                let message = format!("{:#}", report);
                json!({ "error": message, "details": message })
            }
            error => json!({ "error": error.to_string() }),
        };

        ResponseEnvelope::new(status_code, &body)
    }
}
