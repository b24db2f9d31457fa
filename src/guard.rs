use crate::{AuthState, Session};
use tokio::sync::watch;

/// What a protected route should do given the current [`Session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// We don't know who the user is yet, so show a neutral placeholder.
    Loading,
    /// Show the requested content.
    Allow,
    /// Send the user to the login page.
    Redirect(String),
}

/// Decides whether a protected navigation target may be shown.
///
/// The guard holds no session state of its own; it is a pure function of the
/// snapshot it is handed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    login_path: String,
}

impl RouteGuard {
    pub const DEFAULT_LOGIN_PATH: &'static str = "/login";

    pub fn new<S: Into<String>>(login_path: S) -> Self {
        RouteGuard {
            login_path: login_path.into(),
        }
    }

    pub fn login_path(&self) -> &str { &self.login_path }

    pub fn evaluate(&self, session: &Session) -> Decision {
        match session.state {
            AuthState::Unknown | AuthState::Authenticating => Decision::Loading,
            AuthState::Authenticated => Decision::Allow,
            AuthState::Anonymous => Decision::Redirect(self.login_path.clone()),
        }
    }

    /// Wait until the session has been resolved one way or the other, then
    /// decide.
    ///
    /// If the [`crate::SessionManager`] goes away first, the last published
    /// snapshot is used.
    pub async fn settle(
        &self,
        sessions: &mut watch::Receiver<Session>,
    ) -> Decision {
        let resolved = |session: &Session| session.state.is_resolved();

        if sessions.wait_for(resolved).await.is_err() {
            log::debug!("The session manager went away before resolving");
        }

        self.evaluate(&sessions.borrow())
    }
}

impl Default for RouteGuard {
    fn default() -> Self { RouteGuard::new(RouteGuard::DEFAULT_LOGIN_PATH) }
}
