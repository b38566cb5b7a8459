use axum::{extract::State, http::StatusCode, Json};
use tracing::error;

pub mod request;
pub mod response;

use crate::response::{ApiResponse, IntoApiResponse};
use crate::ApiState;

use self::request::CreateContactReq;
use self::response::CreateContactResp;

pub const ACKNOWLEDGEMENT: &str = "Your message has been sent successfully.";

/// Store a contact submission and notify by email
#[utoipa::path(
    post,
    path = "/contacts",
    request_body = CreateContactReq,
    responses(
        (status = 201, description = "Contact submission stored", body = CreateContactResp),
        (status = 400, description = "A required field is missing")
    )
)]
pub async fn create_contact(
    State(state): State<ApiState>,
    Json(body): Json<CreateContactReq>,
) -> ApiResponse<(StatusCode, Json<CreateContactResp>)> {
    body.validate()?;

    let contact = state
        .repo
        .contact
        .save(body.into())
        .await
        .into_response("save contact")?;

    // Delivery is best effort once the row is committed: a mail failure is
    // logged and the caller still gets the acknowledgement.
    let subject = mailer::contact_subject(&contact.subject);
    let text = mailer::contact_body(
        &contact.name,
        &contact.email,
        &contact.subject,
        &contact.message,
    );
    if let Err(e) = state
        .mailer
        .send(&state.config.mail.recipient, &subject, &text)
        .await
    {
        error!("failed to send contact notification: {:?}", e);
    }

    Ok((
        StatusCode::CREATED,
        Json(CreateContactResp {
            detail: ACKNOWLEDGEMENT.to_string(),
        }),
    ))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_acknowledgement_is_the_fixed_string() {
        assert_eq!(ACKNOWLEDGEMENT, "Your message has been sent successfully.");
    }
}
