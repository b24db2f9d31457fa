//! A scriptable [`Api`] for exercising the session layer without a server.

use crate::{
    Api, ApiError, AuthResponse, ProfileUpdate, Registration, Token, User,
};
use async_trait::async_trait;
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};
use tokio::sync::Notify;

/// A canned response for the next call to [`FakeApi`].
pub(crate) enum Reply {
    User(User),
    Auth(AuthResponse),
    Ack,
    Unauthorized,
    Rejected(&'static str),
    /// A server error with no message attached.
    Silent,
    /// The request never made it to the server.
    Unreachable,
}

impl Reply {
    fn into_error(self) -> ApiError {
        match self {
            Reply::Unauthorized => ApiError::Unauthorized {
                message: Some(String::from("Not authorized")),
            },
            Reply::Rejected(message) => ApiError::Rejected {
                status: 400,
                message: Some(String::from(message)),
            },
            Reply::Silent => ApiError::Rejected {
                status: 500,
                message: None,
            },
            Reply::Unreachable => {
                let err = reqwest::Client::new()
                    .get("not a url")
                    .build()
                    .unwrap_err();
                ApiError::HttpClient(err)
            },
            _ => panic!("Reply has the wrong shape for this endpoint"),
        }
    }
}

/// An [`Api`] which hands out canned replies in order and records which
/// endpoints were hit.
#[derive(Clone, Default)]
pub(crate) struct FakeApi {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    calls: Arc<Mutex<Vec<&'static str>>>,
    tokens: Arc<Mutex<Vec<(&'static str, Token)>>>,
    gate: Option<(&'static str, Arc<Notify>)>,
}

impl FakeApi {
    pub(crate) fn replying(replies: Vec<Reply>) -> Self {
        FakeApi {
            replies: Arc::new(Mutex::new(replies.into())),
            ..Default::default()
        }
    }

    /// Make calls to `endpoint` wait until [`FakeApi::release()`] is
    /// called.
    pub(crate) fn gated(mut self, endpoint: &'static str) -> Self {
        self.gate = Some((endpoint, Arc::new(Notify::new())));
        self
    }

    pub(crate) fn release(&self) {
        if let Some((_, gate)) = &self.gate {
            gate.notify_one();
        }
    }

    /// The bearer tokens authenticated endpoints were called with.
    pub(crate) fn tokens(&self) -> Vec<(&'static str, Token)> {
        self.tokens.lock().unwrap().clone()
    }

    async fn enter(&self, endpoint: &'static str, token: Option<&Token>) {
        if let Some(token) = token {
            self.tokens.lock().unwrap().push((endpoint, token.clone()));
        }

        match &self.gate {
            Some((gated, gate)) if *gated == endpoint => {
                gate.notified().await
            },
            _ => {},
        }
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn next(&self, endpoint: &'static str) -> Reply {
        self.calls.lock().unwrap().push(endpoint);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("Unexpected call to {}", endpoint))
    }

    fn next_user(&self, endpoint: &'static str) -> Result<User, ApiError> {
        match self.next(endpoint) {
            Reply::User(user) => Ok(user),
            other => Err(other.into_error()),
        }
    }

    fn next_auth(
        &self,
        endpoint: &'static str,
    ) -> Result<AuthResponse, ApiError> {
        match self.next(endpoint) {
            Reply::Auth(response) => Ok(response),
            other => Err(other.into_error()),
        }
    }

    fn next_ack(&self, endpoint: &'static str) -> Result<(), ApiError> {
        match self.next(endpoint) {
            Reply::Ack => Ok(()),
            other => Err(other.into_error()),
        }
    }
}

#[async_trait]
impl Api for FakeApi {
    async fn me(&self, token: &Token) -> Result<User, ApiError> {
        self.enter("me", Some(token)).await;
        self.next_user("me")
    }

    async fn login(
        &self,
        _email: &str,
        _password: &str,
    ) -> Result<AuthResponse, ApiError> {
        self.enter("login", None).await;
        self.next_auth("login")
    }

    async fn register(
        &self,
        _registration: &Registration,
    ) -> Result<AuthResponse, ApiError> {
        self.enter("register", None).await;
        self.next_auth("register")
    }

    async fn forgot_password(&self, _email: &str) -> Result<(), ApiError> {
        self.enter("forgot_password", None).await;
        self.next_ack("forgot_password")
    }

    async fn reset_password(
        &self,
        _reset_token: &str,
        _password: &str,
    ) -> Result<(), ApiError> {
        self.enter("reset_password", None).await;
        self.next_ack("reset_password")
    }

    async fn verify_email(
        &self,
        _verification_token: &str,
    ) -> Result<(), ApiError> {
        self.enter("verify_email", None).await;
        self.next_ack("verify_email")
    }

    async fn update_profile(
        &self,
        token: &Token,
        _update: &ProfileUpdate,
    ) -> Result<User, ApiError> {
        self.enter("update_profile", Some(token)).await;
        self.next_user("update_profile")
    }

    async fn change_password(
        &self,
        token: &Token,
        _current_password: &str,
        _new_password: &str,
    ) -> Result<(), ApiError> {
        self.enter("change_password", Some(token)).await;
        self.next_ack("change_password")
    }
}

pub(crate) fn user(username: &str) -> User {
    User {
        username: String::from(username),
        ..Default::default()
    }
}

pub(crate) fn granted(token: &str, username: &str) -> Reply {
    Reply::Auth(AuthResponse {
        token: Token::new(token),
        user: user(username),
    })
}
