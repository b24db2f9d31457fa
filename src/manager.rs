use crate::{
    endpoints::ApiError, Api, AuthResponse, AuthState, ProfileUpdate,
    Registration, Session, Token, TokenStore,
};
use tokio::sync::watch;

const LOGIN_FAILED: &str = "Login failed";
const REGISTRATION_FAILED: &str = "Registration failed";
const PROFILE_UPDATE_FAILED: &str = "Profile update failed";
const PASSWORD_CHANGE_FAILED: &str = "Password change failed";
const FORGOT_PASSWORD_FAILED: &str = "Unable to send the password reset email";
const RESET_PASSWORD_FAILED: &str = "Password reset failed";
const VERIFY_EMAIL_FAILED: &str = "Email verification failed";
const MISSING_CREDENTIALS: &str = "Email and password are required";
const INCOMPLETE_REGISTRATION: &str =
    "Username, email and password are required";
const NOT_LOGGED_IN: &str = "You must be logged in";

/// The single source of truth for who (if anyone) is logged in.
///
/// Every operation reports failure through [`Session::last_error`] and a
/// `bool` return value instead of an error, and each one clears the previous
/// error before it starts.
///
/// Observers get immutable [`Session`] snapshots via
/// [`SessionManager::subscribe()`].
#[derive(Debug)]
pub struct SessionManager<A, S> {
    api: A,
    store: S,
    state: watch::Sender<Session>,
}

impl<A: Api, S: TokenStore> SessionManager<A, S> {
    /// Create a new manager in the [`AuthState::Unknown`] state. Call
    /// [`SessionManager::restore()`] to find out who is logged in.
    pub fn new(api: A, store: S) -> Self {
        let (state, _) = watch::channel(Session::unknown());

        SessionManager { api, store, state }
    }

    /// Register an observer which will see every new [`Session`].
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// The most recently published [`Session`].
    pub fn snapshot(&self) -> Session { self.state.borrow().clone() }

    /// The bearer token to use for authenticated requests, if any.
    pub fn token(&self) -> Option<Token> { self.state.borrow().token.clone() }

    pub fn api(&self) -> &A { &self.api }

    pub fn store(&self) -> &S { &self.store }

    /// Try to pick up where the last run left off using the persisted token.
    ///
    /// A token the server refuses is forgotten. If the server can't be
    /// reached the token is kept so a later call can try again, but the
    /// session still resolves to [`AuthState::Anonymous`].
    pub async fn restore(&self) {
        let token = match self.store.load() {
            Ok(Some(token)) => token,
            Ok(None) => {
                log::debug!("No persisted session to restore");
                self.publish(Session::anonymous());
                return;
            },
            Err(e) => {
                log::warn!("Unable to read the persisted session: {}", e);
                self.publish(Session::anonymous());
                return;
            },
        };

        self.publish(Session::authenticating(token.clone()));
        let outcome = self.api.me(&token).await;

        let applied = self.state.send_if_modified(|session| {
            // a login or logout may have happened while we were waiting
            if session.state != AuthState::Authenticating
                || session.token.as_ref() != Some(&token)
            {
                return false;
            }

            *session = match outcome {
                Ok(user) => {
                    log::info!("Restored the session for {}", user.username);
                    Session::authenticated(token.clone(), user)
                },
                Err(e) if e.is_unauthorized() => {
                    log::info!("The persisted session is no longer valid");
                    self.forget_token();
                    Session::anonymous()
                },
                Err(e) => {
                    log::warn!(
                        "Unable to validate the persisted session, keeping \
                         the token for later: {}",
                        e
                    );
                    Session::anonymous()
                },
            };
            true
        });

        if !applied {
            log::debug!(
                "The session changed while the persisted token was being \
                 validated, ignoring the result"
            );
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> bool {
        self.clear_error();

        if email.trim().is_empty() || password.is_empty() {
            self.set_error(MISSING_CREDENTIALS);
            return false;
        }

        match self.api.login(email, password).await {
            Ok(response) => {
                self.establish(response);
                true
            },
            Err(e) => {
                self.report(&e, LOGIN_FAILED);
                false
            },
        }
    }

    pub async fn register(&self, registration: &Registration) -> bool {
        self.clear_error();

        if !registration.is_complete() {
            self.set_error(INCOMPLETE_REGISTRATION);
            return false;
        }

        match self.api.register(registration).await {
            Ok(response) => {
                self.establish(response);
                true
            },
            Err(e) => {
                self.report(&e, REGISTRATION_FAILED);
                false
            },
        }
    }

    /// Forget the current session. This never fails and never touches the
    /// network.
    pub async fn logout(&self) {
        self.forget_token();
        self.publish(Session::anonymous());
        log::info!("Logged out");
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> bool {
        self.clear_error();

        let token = match self.require_token() {
            Some(token) => token,
            None => return false,
        };

        match self.api.update_profile(&token, update).await {
            Ok(user) => {
                self.state.send_if_modified(|session| {
                    // the user may have logged out (or in as someone else)
                    // while we were waiting
                    if session.state != AuthState::Authenticated
                        || session.token.as_ref() != Some(&token)
                    {
                        return false;
                    }
                    session.user = Some(user);
                    true
                });
                true
            },
            Err(e) => {
                self.report(&e, PROFILE_UPDATE_FAILED);
                false
            },
        }
    }

    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> bool {
        self.clear_error();

        let token = match self.require_token() {
            Some(token) => token,
            None => return false,
        };

        let result = self
            .api
            .change_password(&token, current_password, new_password)
            .await;
        self.check(result, PASSWORD_CHANGE_FAILED)
    }

    pub async fn forgot_password(&self, email: &str) -> bool {
        self.clear_error();

        let result = self.api.forgot_password(email).await;
        self.check(result, FORGOT_PASSWORD_FAILED)
    }

    /// Set a new password using a reset token. The user will need to log in
    /// afterwards.
    pub async fn reset_password(
        &self,
        reset_token: &str,
        password: &str,
    ) -> bool {
        self.clear_error();

        let result = self.api.reset_password(reset_token, password).await;
        self.check(result, RESET_PASSWORD_FAILED)
    }

    pub async fn verify_email(&self, verification_token: &str) -> bool {
        self.clear_error();

        let result = self.api.verify_email(verification_token).await;
        self.check(result, VERIFY_EMAIL_FAILED)
    }

    pub fn clear_error(&self) {
        self.state
            .send_if_modified(|session| session.last_error.take().is_some());
    }

    fn publish(&self, session: Session) {
        log::trace!("New session state: {:?}", session.state);
        self.state.send_replace(session);
    }

    fn establish(&self, response: AuthResponse) {
        let AuthResponse { token, user } = response;

        if let Err(e) = self.store.save(&token) {
            log::warn!(
                "Unable to persist the session, it will only last until \
                 exit: {}",
                e
            );
        }

        self.publish(Session::authenticated(token, user));
    }

    fn forget_token(&self) {
        if let Err(e) = self.store.clear() {
            log::warn!("Unable to clear the persisted session: {}", e);
        }
    }

    fn require_token(&self) -> Option<Token> {
        let token = self.token();

        if token.is_none() {
            self.set_error(NOT_LOGGED_IN);
        }

        token
    }

    fn check(&self, result: Result<(), ApiError>, fallback: &str) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                self.report(&e, fallback);
                false
            },
        }
    }

    fn report(&self, error: &ApiError, fallback: &str) {
        log::debug!("Request failed: {}", error);

        let message = error.server_message().unwrap_or(fallback);
        self.set_error(message);
    }

    fn set_error(&self, message: &str) {
        let message = message.to_string();
        self.state
            .send_modify(|session| session.last_error = Some(message));
    }
}
