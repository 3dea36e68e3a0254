use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use mailform_core_contact_contracts::{ContactSendMessageError, ContactService};

use super::{error, internal_server_error};
use crate::models::contact::{self, ApiDeliveryReceipt};

pub fn router(service: Arc<impl ContactService>) -> Router<()> {
    Router::new()
        .route("/contact", routing::post(send_message))
        .with_state(service)
}

async fn send_message(
    service: State<Arc<impl ContactService>>,
    Json(payload): Json<serde_json::Value>,
) -> Response {
    let message = match contact::validate(&payload) {
        Ok(message) => message,
        Err(errors) => return (StatusCode::UNPROCESSABLE_ENTITY, Json(errors)).into_response(),
    };

    match service.send_message(message).await {
        Ok(receipt) => Json(ApiDeliveryReceipt::from(receipt)).into_response(),
        Err(ContactSendMessageError::Send(detail)) => error(StatusCode::BAD_GATEWAY, detail),
        Err(ContactSendMessageError::Other(err)) => internal_server_error(err),
    }
}
