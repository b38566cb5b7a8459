use serde::Deserialize;
use utoipa::ToSchema;

use crate::ApiError;
use entity::prelude::NewContact;

/// Missing fields deserialize as empty so validation can name them instead
/// of the framework rejecting the body wholesale.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateContactReq {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl CreateContactReq {
    pub fn validate(&self) -> Result<(), ApiError> {
        let fields = [
            (&self.name, "name"),
            (&self.email, "email"),
            (&self.subject, "subject"),
            (&self.message, "message"),
        ];

        for (value, field) in fields {
            if value.trim().is_empty() {
                return Err(ApiError::ValidationError(format!("{} is required", field)));
            }
        }

        Ok(())
    }
}

impl From<CreateContactReq> for NewContact {
    fn from(value: CreateContactReq) -> Self {
        Self {
            name: value.name,
            email: value.email,
            subject: value.subject,
            message: value.message,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn valid() -> CreateContactReq {
        CreateContactReq {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Hello".to_string(),
            message: "A question.".to_string(),
        }
    }

    #[test]
    fn test_valid_submission_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_each_blank_field_is_named() {
        for field in ["name", "email", "subject", "message"] {
            let mut req = valid();
            match field {
                "name" => req.name = "".to_string(),
                "email" => req.email = "".to_string(),
                "subject" => req.subject = "".to_string(),
                _ => req.message = " ".to_string(),
            }

            match req.validate() {
                Err(ApiError::ValidationError(message)) => assert!(message.contains(field)),
                _ => panic!("expected a validation error for {}", field),
            }
        }
    }
}
