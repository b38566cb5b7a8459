use serde::Serialize;
use utoipa::ToSchema;

/// Fixed acknowledgement; the stored record is never returned.
#[derive(Serialize, ToSchema)]
pub struct CreateContactResp {
    pub detail: String,
}
