use super::ApiError;
use crate::Token;
use reqwest::{Client, Method};
use serde_derive::Serialize;
use url::Url;

/// Change the logged-in user's password.
pub async fn change_password(
    client: &Client,
    base_url: &Url,
    token: &Token,
    current_password: &str,
    new_password: &str,
) -> Result<(), ApiError> {
    let data = Data {
        current_password,
        new_password,
    };
    let request = super::request(
        client,
        base_url,
        Method::PUT,
        &["users", "password"],
        Some(token),
    )?
    .json(&data);

    super::acknowledge(request).await
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Data<'a> {
    current_password: &'a str,
    new_password: &'a str,
}
