use crate::{
    endpoints::{self, ApiError, AuthResponse},
    Config, ProfileUpdate, Registration, Token, User,
};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use url::Url;

/// The panel's REST API, as seen by the [`crate::SessionManager`].
#[async_trait]
pub trait Api: Send + Sync {
    async fn me(&self, token: &Token) -> Result<User, ApiError>;

    async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ApiError>;

    async fn register(
        &self,
        registration: &Registration,
    ) -> Result<AuthResponse, ApiError>;

    async fn forgot_password(&self, email: &str) -> Result<(), ApiError>;

    async fn reset_password(
        &self,
        reset_token: &str,
        password: &str,
    ) -> Result<(), ApiError>;

    async fn verify_email(
        &self,
        verification_token: &str,
    ) -> Result<(), ApiError>;

    async fn update_profile(
        &self,
        token: &Token,
        update: &ProfileUpdate,
    ) -> Result<User, ApiError>;

    async fn change_password(
        &self,
        token: &Token,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError>;
}

/// An [`Api`] which talks to a real server over HTTP.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: Url,
}

impl HttpApi {
    pub fn new(client: Client, base_url: Url) -> Self {
        HttpApi { client, base_url }
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let client = config.http_client()?;

        Ok(HttpApi::new(client, config.base_url.clone()))
    }

    pub fn base_url(&self) -> &Url { &self.base_url }

    /// Start an authenticated request to some other part of the API (e.g.
    /// `["servers", id, "start"]`).
    pub fn authorized(
        &self,
        method: Method,
        segments: &[&str],
        token: &Token,
    ) -> Result<RequestBuilder, ApiError> {
        endpoints::request(
            &self.client,
            &self.base_url,
            method,
            segments,
            Some(token),
        )
    }
}

#[async_trait]
impl Api for HttpApi {
    async fn me(&self, token: &Token) -> Result<User, ApiError> {
        endpoints::me(&self.client, &self.base_url, token).await
    }

    async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ApiError> {
        endpoints::login(&self.client, &self.base_url, email, password).await
    }

    async fn register(
        &self,
        registration: &Registration,
    ) -> Result<AuthResponse, ApiError> {
        endpoints::register(&self.client, &self.base_url, registration).await
    }

    async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        endpoints::forgot_password(&self.client, &self.base_url, email).await
    }

    async fn reset_password(
        &self,
        reset_token: &str,
        password: &str,
    ) -> Result<(), ApiError> {
        endpoints::reset_password(
            &self.client,
            &self.base_url,
            reset_token,
            password,
        )
        .await
    }

    async fn verify_email(
        &self,
        verification_token: &str,
    ) -> Result<(), ApiError> {
        endpoints::verify_email(
            &self.client,
            &self.base_url,
            verification_token,
        )
        .await
    }

    async fn update_profile(
        &self,
        token: &Token,
        update: &ProfileUpdate,
    ) -> Result<User, ApiError> {
        endpoints::update_profile(&self.client, &self.base_url, token, update)
            .await
    }

    async fn change_password(
        &self,
        token: &Token,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        endpoints::change_password(
            &self.client,
            &self.base_url,
            token,
            current_password,
            new_password,
        )
        .await
    }
}
