//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Form, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};

use alipay_types::{
    AppError, BillingHooks, CheckoutRequest, NotifyParams, PayOutcome, ProviderClient,
    SettingsStore, config_schema, metadata,
};

use crate::AlipayGateway;

/// Application state shared across handlers.
pub struct AppState<P, S, B>
where
    P: ProviderClient,
    S: SettingsStore,
    B: BillingHooks,
{
    pub gateway: AlipayGateway<P, S, B>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<alipay_types::GatewayError> for ApiError {
    fn from(err: alipay_types::GatewayError) -> Self {
        ApiError(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Upstream { msg, sub_msg } => {
                (StatusCode::BAD_GATEWAY, format!("{msg}, {sub_msg}"))
            }
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Gateway metadata and settings schema for the host settings UI.
pub async fn config() -> impl IntoResponse {
    Json(serde_json::json!({
        "gateway": metadata(),
        "fields": config_schema(),
    }))
}

/// Start a hosted-checkout payment for an order.
#[tracing::instrument(skip(state, req), fields(order_id = %req.order_id))]
pub async fn checkout<P, S, B>(
    State(state): State<Arc<AppState<P, S, B>>>,
    Json(req): Json<CheckoutRequest>,
) -> Result<Response, ApiError>
where
    P: ProviderClient,
    S: SettingsStore,
    B: BillingHooks,
{
    let outcome = state
        .gateway
        .pay(req.total, &req.products, &req.order_id)
        .await?;

    Ok(match outcome {
        PayOutcome::AlreadyPaid { invoice_url } => Redirect::to(&invoice_url).into_response(),
        PayOutcome::Checkout { html } => Html(html).into_response(),
    })
}

/// Provider notification receiver. Always replies 200 with a plaintext
/// `success`/`failure` body - that is the acknowledgement protocol.
#[tracing::instrument(skip(state, params))]
pub async fn webhook<P, S, B>(
    State(state): State<Arc<AppState<P, S, B>>>,
    Form(params): Form<NotifyParams>,
) -> impl IntoResponse
where
    P: ProviderClient,
    S: SettingsStore,
    B: BillingHooks,
{
    state.gateway.webhook(&params).await.as_str()
}

/// Browser return from the checkout page.
#[tracing::instrument(skip(state, params))]
pub async fn redirect<P, S, B>(
    State(state): State<Arc<AppState<P, S, B>>>,
    Query(params): Query<NotifyParams>,
) -> Result<Redirect, ApiError>
where
    P: ProviderClient,
    S: SettingsStore,
    B: BillingHooks,
{
    let invoice_url = state.gateway.redirect(&params).await?;
    Ok(Redirect::to(&invoice_url))
}
