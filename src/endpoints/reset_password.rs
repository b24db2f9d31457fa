use super::ApiError;
use reqwest::{Client, Method};
use serde_derive::Serialize;
use url::Url;

/// Set a new password using the token from a password reset email.
pub async fn reset_password(
    client: &Client,
    base_url: &Url,
    reset_token: &str,
    password: &str,
) -> Result<(), ApiError> {
    let request = super::request(
        client,
        base_url,
        Method::PUT,
        &["auth", "reset-password", reset_token],
        None,
    )?
    .json(&Data { password });

    super::acknowledge(request).await
}

#[derive(Serialize)]
struct Data<'a> {
    password: &'a str,
}
