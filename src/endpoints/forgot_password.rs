use super::ApiError;
use reqwest::{Client, Method};
use serde_derive::Serialize;
use url::Url;

/// Ask the server to email a password reset link.
pub async fn forgot_password(
    client: &Client,
    base_url: &Url,
    email: &str,
) -> Result<(), ApiError> {
    let request = super::request(
        client,
        base_url,
        Method::POST,
        &["auth", "forgot-password"],
        None,
    )?
    .json(&Data { email });

    super::acknowledge(request).await
}

#[derive(Debug, Serialize)]
struct Data<'a> {
    email: &'a str,
}
