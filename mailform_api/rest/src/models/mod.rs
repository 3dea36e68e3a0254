use serde::Serialize;

pub mod contact;

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub detail: String,
}
