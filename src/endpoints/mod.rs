//! The panel API's endpoints.
//!
//! Each endpoint is a free function which takes the HTTP client and the API's
//! base URL explicitly. Endpoints which need to be authenticated also take the
//! bearer [`Token`], so there is no hidden "default header" state.

mod change_password;
mod forgot_password;
mod login;
mod me;
mod register;
mod reset_password;
mod update_profile;
mod verify_email;

pub use change_password::change_password;
pub use forgot_password::forgot_password;
pub use login::{login, AuthResponse};
pub use me::me;
pub use register::register;
pub use reset_password::reset_password;
pub use update_profile::update_profile;
pub use verify_email::verify_email;

use crate::Token;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde_derive::Deserialize;
use url::Url;

/// Errors that may be returned when talking to the API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP client encountered an error (e.g. the server is unreachable).
    #[error("Unable to send the request")]
    HttpClient(#[from] reqwest::Error),
    /// The server doesn't accept our credentials (HTTP 401 or 403).
    #[error("The server rejected our credentials")]
    Unauthorized { message: Option<String> },
    /// The server understood the request but refused it, typically because
    /// of a validation failure.
    #[error("The request was rejected by the server (status {})", status)]
    Rejected { status: u16, message: Option<String> },
    /// Unable to parse the response body.
    #[error("Unable to parse the response")]
    Decode(#[from] serde_json::Error),
    #[error("The response didn't contain any data")]
    MissingData,
    #[error("\"{}\" can't be used as a base URL", _0)]
    BadBaseUrl(Url),
}

impl ApiError {
    /// The human-readable message the server sent back, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { message }
            | ApiError::Rejected { message, .. } => message
                .as_deref()
                .filter(|message| !message.trim().is_empty()),
            _ => None,
        }
    }

    /// Did the server actively refuse our credentials, as opposed to being
    /// unreachable or misbehaving?
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

/// The `{success, data, message}` document every endpoint responds with.
#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Envelope<T> {
    success: Option<bool>,
    data: Option<T>,
    #[serde(alias = "error")]
    message: Option<String>,
}

/// Build the URL for an endpoint, percent-encoding each path segment.
pub(crate) fn endpoint(
    base_url: &Url,
    segments: &[&str],
) -> Result<Url, ApiError> {
    let mut url = base_url.clone();

    url.path_segments_mut()
        .map_err(|_| ApiError::BadBaseUrl(base_url.clone()))?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}

/// Start building a request, attaching the bearer token when one is given.
pub(crate) fn request(
    client: &Client,
    base_url: &Url,
    method: Method,
    segments: &[&str],
    token: Option<&Token>,
) -> Result<RequestBuilder, ApiError> {
    let url = endpoint(base_url, segments)?;
    log::debug!("Sending a {} request to {}", method, url);

    let builder = client.request(method, url);

    match token {
        Some(token) => Ok(builder.bearer_auth(token.as_str())),
        None => Ok(builder),
    }
}

async fn send(
    builder: RequestBuilder,
) -> Result<(StatusCode, String), ApiError> {
    let response = builder.send().await?;
    let status = response.status();
    log::trace!("Headers: {:#?}", response.headers());

    let body = response.text().await?;
    log::trace!("Response ({}): {}", status, body);

    Ok((status, body))
}

/// Send a request whose response must carry a `data` payload.
async fn fetch<T>(builder: RequestBuilder) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    let (status, body) = send(builder).await?;

    interpret(status, &body)?.ok_or(ApiError::MissingData)
}

/// Send a request where we only care whether the server accepted it.
async fn acknowledge(builder: RequestBuilder) -> Result<(), ApiError> {
    let (status, body) = send(builder).await?;

    interpret::<IgnoredAny>(status, &body).map(|_| ())
}

/// Turn a raw response into either its `data` payload or an [`ApiError`].
fn interpret<T>(status: StatusCode, body: &str) -> Result<Option<T>, ApiError>
where
    T: DeserializeOwned,
{
    if !status.is_success() {
        let message = serde_json::from_str::<Envelope<IgnoredAny>>(body)
            .ok()
            .and_then(|envelope| envelope.message);

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
        {
            return Err(ApiError::Unauthorized { message });
        }

        return Err(ApiError::Rejected {
            status: status.as_u16(),
            message,
        });
    }

    if body.trim().is_empty() {
        return Ok(None);
    }

    let envelope: Envelope<T> = serde_json::from_str(body)?;

    if envelope.success == Some(false) {
        return Err(ApiError::Rejected {
            status: status.as_u16(),
            message: envelope.message,
        });
    }

    Ok(envelope.data)
}
