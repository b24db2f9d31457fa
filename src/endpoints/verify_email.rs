use super::ApiError;
use reqwest::{Client, Method};
use url::Url;

/// Confirm an email address using the token from a verification email.
pub async fn verify_email(
    client: &Client,
    base_url: &Url,
    verification_token: &str,
) -> Result<(), ApiError> {
    let request = super::request(
        client,
        base_url,
        Method::GET,
        &["auth", "verify-email", verification_token],
        None,
    )?;

    super::acknowledge(request).await
}
