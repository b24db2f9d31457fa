use super::{ApiError, AuthResponse};
use crate::Registration;
use reqwest::{Client, Method};
use url::Url;

/// Create a new account, logging in as that user.
pub async fn register(
    client: &Client,
    base_url: &Url,
    registration: &Registration,
) -> Result<AuthResponse, ApiError> {
    let request = super::request(
        client,
        base_url,
        Method::POST,
        &["auth", "register"],
        None,
    )?
    .json(registration);

    let response: AuthResponse = super::fetch(request).await?;
    log::info!(
        "Registered {} on the \"{}\" plan",
        response.user.username,
        registration.plan
    );

    Ok(response)
}
