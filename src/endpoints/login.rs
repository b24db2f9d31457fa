use super::ApiError;
use crate::{Token, User};
use reqwest::{Client, Method};
use serde_derive::{Deserialize, Serialize};
use url::Url;

/// Authenticate with the panel and get a fresh bearer token.
pub async fn login(
    client: &Client,
    base_url: &Url,
    email: &str,
    password: &str,
) -> Result<AuthResponse, ApiError> {
    let data = Data { email, password };
    let request = super::request(
        client,
        base_url,
        Method::POST,
        &["auth", "login"],
        None,
    )?
    .json(&data);

    let response: AuthResponse = super::fetch(request).await?;
    log::info!("Logged in as {}", response.user.username);

    Ok(response)
}

/// What the server hands back after a successful login or registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: Token,
    pub user: User,
}

#[derive(Serialize)]
struct Data<'a> {
    email: &'a str,
    password: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Id, ResourceLimits};
    use reqwest::StatusCode;

    #[test]
    fn parse_happy_login_response() {
        let src = include_str!("login_response_okay.json");
        let should_be = AuthResponse {
            token: Token::new("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.STEVE"),
            user: User {
                id: Id::from("64b7f2c1e4a1c2d3e4f5a6b7"),
                username: String::from("steve"),
                email: String::from("steve@example.com"),
                plan: String::from("free"),
                resource_limits: ResourceLimits {
                    max_servers: 1,
                    memory: 1024,
                    storage: 5120,
                    cpu: 100,
                },
            },
        };

        let got: AuthResponse =
            super::super::interpret(StatusCode::OK, src).unwrap().unwrap();

        assert_eq!(got, should_be);
    }

    #[test]
    fn parse_rejected_login_response() {
        let src = include_str!("login_response_rejected.json");

        let got = super::super::interpret::<AuthResponse>(
            StatusCode::BAD_REQUEST,
            src,
        )
        .unwrap_err();

        assert_eq!(got.server_message(), Some("Invalid credentials"));
    }

    #[test]
    fn login_payload_is_plain_json() {
        let data = Data {
            email: "user@x.com",
            password: "secret",
        };

        let got = serde_json::to_value(&data).unwrap();

        assert_eq!(
            got,
            serde_json::json!({ "email": "user@x.com", "password": "secret" })
        );
    }
}
