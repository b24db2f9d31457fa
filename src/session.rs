use crate::{Token, User};

/// Where the client is in the authentication lifecycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AuthState {
    /// Nothing has been checked yet.
    Unknown,
    /// A persisted token is being validated.
    Authenticating,
    Authenticated,
    Anonymous,
}

impl AuthState {
    /// Has the question "who is logged in?" been answered yet?
    pub fn is_resolved(self) -> bool {
        match self {
            AuthState::Authenticated | AuthState::Anonymous => true,
            AuthState::Unknown | AuthState::Authenticating => false,
        }
    }
}

/// An immutable snapshot of the client's authentication state.
///
/// `user` is present exactly when `state` is [`AuthState::Authenticated`],
/// and `token` only while authenticated or authenticating. The constructors
/// are the only way to change `state`, which keeps those two rules intact.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Session {
    pub token: Option<Token>,
    pub user: Option<User>,
    pub state: AuthState,
    pub last_error: Option<String>,
}

impl Session {
    pub(crate) fn unknown() -> Self {
        Session {
            token: None,
            user: None,
            state: AuthState::Unknown,
            last_error: None,
        }
    }

    pub(crate) fn authenticating(token: Token) -> Self {
        Session {
            token: Some(token),
            state: AuthState::Authenticating,
            ..Session::unknown()
        }
    }

    pub(crate) fn authenticated(token: Token, user: User) -> Self {
        Session {
            token: Some(token),
            user: Some(user),
            state: AuthState::Authenticated,
            last_error: None,
        }
    }

    pub(crate) fn anonymous() -> Self {
        Session {
            state: AuthState::Anonymous,
            ..Session::unknown()
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == AuthState::Authenticated
    }
}

impl Default for Session {
    fn default() -> Self { Session::unknown() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holds_invariants(session: &Session) -> bool {
        let user_matches_state =
            session.user.is_some() == session.is_authenticated();
        let token_allowed = session.token.is_none()
            || matches!(
                session.state,
                AuthState::Authenticated | AuthState::Authenticating
            );

        user_matches_state && token_allowed
    }

    #[test]
    fn every_constructor_upholds_the_invariants() {
        let token = Token::new("T");
        let sessions = vec![
            Session::unknown(),
            Session::authenticating(token.clone()),
            Session::authenticated(token, User::default()),
            Session::anonymous(),
        ];

        for session in &sessions {
            assert!(holds_invariants(session), "{:?}", session);
        }
    }

    #[test]
    fn only_final_states_are_resolved() {
        assert!(!AuthState::Unknown.is_resolved());
        assert!(!AuthState::Authenticating.is_resolved());
        assert!(AuthState::Authenticated.is_resolved());
        assert!(AuthState::Anonymous.is_resolved());
    }
}
