use anyhow::ensure;
use reqwest::header::{HeaderMap, HeaderValue};

/// Client for an HTTP mail-delivery API. Messages are submitted as a form
/// post to `<base_url>/messages`; a non-success status is an error the
/// caller decides what to do with.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    from: String,
    client: reqwest::Client,
}

impl Client {
    pub fn new(base_url: String, api_key: &str, from: String) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("*/*"));
        headers.insert(
            "Authorization",
            HeaderValue::from_str(format!("Bearer {}", api_key).as_str())?,
        );

        let client = reqwest::ClientBuilder::new()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            base_url,
            from,
            client,
        })
    }

    pub async fn send(&self, to: &str, subject: &str, text: &str) -> anyhow::Result<()> {
        let response = self
            .client
            .post(format!("{}/messages", self.base_url))
            .form(&[
                ("from", self.from.as_str()),
                ("to", to),
                ("subject", subject),
                ("text", text),
            ])
            .send()
            .await?;

        let status_code = response.status();
        let body = response.text().await;

        ensure!(
            status_code.is_success(),
            "status code: {}, response: {:?}",
            status_code,
            body
        );

        Ok(())
    }
}

pub fn contact_subject(subject: &str) -> String {
    format!("Blog Contact: {}", subject)
}

pub fn contact_body(name: &str, email: &str, subject: &str, message: &str) -> String {
    format!(
        "New contact form submission:\n\n\
         Name: {}\n\
         Email: {}\n\
         Subject: {}\n\n\
         Message:\n{}\n",
        name, email, subject, message
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_contact_subject_is_prefixed() {
        assert_eq!(contact_subject("Hi"), "Blog Contact: Hi");
    }

    #[test]
    fn test_contact_body_carries_all_fields() {
        // Arrange / Act
        let body = contact_body("Ada", "ada@example.com", "Hello", "A question.");

        // Assert
        assert!(body.contains("Name: Ada"));
        assert!(body.contains("Email: ada@example.com"));
        assert!(body.contains("Subject: Hello"));
        assert!(body.contains("A question."));
    }
}
