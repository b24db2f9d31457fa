//! Session management for the CraftPanel server-hosting API.
//!
//! The [`SessionManager`] is the single source of truth for whether the user
//! is logged in (and as whom). It talks to the panel's REST API through the
//! [`Api`] trait, persists the bearer token with a [`TokenStore`], and
//! publishes immutable [`Session`] snapshots which a [`RouteGuard`] (or any
//! other observer) can watch.

#![forbid(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

mod api;
mod config;
pub mod endpoints;
mod guard;
mod id;
mod manager;
mod session;
mod storage;
#[cfg(test)]
mod test_support;
mod token;
mod user;

pub use api::{Api, HttpApi};
pub use config::Config;
pub use endpoints::{ApiError, AuthResponse};
pub use guard::{Decision, RouteGuard};
pub use id::Id;
pub use manager::SessionManager;
pub use session::{AuthState, Session};
pub use storage::{
    FileStore, MemoryStore, StorageError, TokenStore, STORAGE_KEY,
};
pub use token::Token;
pub use user::{ProfileUpdate, Registration, ResourceLimits, User};

/// The default user agent to use when communicating with the panel's API.
pub const DEFAULT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION"));
