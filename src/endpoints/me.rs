use super::ApiError;
use crate::{Token, User};
use reqwest::{Client, Method};
use url::Url;

/// Fetch the profile belonging to `token`.
///
/// This is also how a persisted token gets validated: the server responds
/// with [`ApiError::Unauthorized`] once the token has expired or been
/// revoked.
pub async fn me(
    client: &Client,
    base_url: &Url,
    token: &Token,
) -> Result<User, ApiError> {
    let request = super::request(
        client,
        base_url,
        Method::GET,
        &["auth", "me"],
        Some(token),
    )?;

    let user: User = super::fetch(request).await?;
    log::debug!("The token belongs to {}", user.username);

    Ok(user)
}
