//! Error types for the gateway adapter.

/// Domain-level errors (value violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Amount cannot be negative")]
    NegativeAmount,

    #[error("Invalid order id: {0:?}")]
    InvalidOrderId(String),
}

/// Provider-level errors (configuration, transport, gateway rejections).
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Missing gateway setting: {0}")]
    MissingSetting(&'static str),

    #[error("Invalid key material: {0}")]
    InvalidKey(String),

    #[error("Certificate error: {0}")]
    Certificate(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Gateway rejected the request: {msg} ({code})")]
    Gateway {
        code: String,
        msg: String,
        sub_code: Option<String>,
        sub_msg: Option<String>,
    },

    #[error("Malformed gateway response: {0}")]
    Malformed(String),
}

/// Application-level errors raised by gateway operations.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Checkout failed: {msg}, {sub_msg}")]
    CheckoutFailed { msg: String, sub_msg: String },

    #[error("Invalid request")]
    InvalidRequest,

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Billing callback failed: {0}")]
    Billing(String),
}

/// HTTP-facing errors.
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payment provider rejected the request: {msg}, {sub_msg}")]
    Upstream { msg: String, sub_msg: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::InvalidRequest => AppError::BadRequest("Invalid request".into()),
            GatewayError::Domain(e) => AppError::BadRequest(e.to_string()),
            GatewayError::CheckoutFailed { msg, sub_msg } => AppError::Upstream { msg, sub_msg },
            GatewayError::Provider(ProviderError::Gateway {
                msg, sub_msg, ..
            }) => AppError::Upstream {
                msg,
                sub_msg: sub_msg.unwrap_or_default(),
            },
            GatewayError::Provider(e) => AppError::Internal(e.to_string()),
            GatewayError::Billing(e) => AppError::Internal(e),
        }
    }
}
