use super::ApiError;
use crate::{ProfileUpdate, Token, User};
use reqwest::{Client, Method};
use url::Url;

/// Update the logged-in user's profile, returning the profile as the server
/// now sees it.
pub async fn update_profile(
    client: &Client,
    base_url: &Url,
    token: &Token,
    update: &ProfileUpdate,
) -> Result<User, ApiError> {
    log::trace!("Profile update: {:#?}", update);

    let request = super::request(
        client,
        base_url,
        Method::PUT,
        &["users", "profile"],
        Some(token),
    )?
    .json(update);

    super::fetch(request).await
}
