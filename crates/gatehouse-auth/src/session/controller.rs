//! Session controller: the register, login, check, and logout flows.
//!
//! Every call is a self-contained unit of work: no session state survives
//! between calls. The only shared resources are the user store and the
//! signing keys.

use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use gatehouse_core::config::auth::AuthConfig;
use gatehouse_core::error::{AppError, ErrorKind};
use gatehouse_core::result::AppResult;
use gatehouse_database::store::UserStore;
use gatehouse_entity::user::CreateUser;

use crate::jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder};
use crate::password::{CredentialPolicy, PasswordHasher};

/// Returned for every failed login, whatever the cause.
pub const LOGIN_FAILURE_MESSAGE: &str = "Incorrect username or password";

/// Returned for every rejected or missing session token.
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

/// Plaintext behind the decoy hash used for unknown usernames.
const DECOY_PASSWORD: &str = "gatehouse-decoy-credential";

/// Orchestrates the hasher, the token issuer, and the user store.
#[derive(Clone)]
pub struct SessionController {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
    policy: CredentialPolicy,
    /// Verified against when the username is unknown, so both failure
    /// paths cost one hash verification.
    decoy_hash: Arc<str>,
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("hasher", &self.hasher)
            .field("encoder", &self.encoder)
            .field("decoder", &self.decoder)
            .finish_non_exhaustive()
    }
}

impl SessionController {
    /// Creates a controller from already-built components.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
    ) -> AppResult<Self> {
        let decoy_hash = hasher.hash_password(DECOY_PASSWORD)?;

        Ok(Self {
            users,
            hasher,
            encoder,
            decoder,
            policy: CredentialPolicy::new(),
            decoy_hash: Arc::from(decoy_hash),
        })
    }

    /// Creates a controller and its components from auth configuration.
    pub fn from_config(config: &AuthConfig, users: Arc<dyn UserStore>) -> AppResult<Self> {
        Self::new(
            users,
            Arc::new(PasswordHasher::new(config)?),
            Arc::new(JwtEncoder::new(config)?),
            Arc::new(JwtDecoder::new(config)),
        )
    }

    /// The user store this controller writes to.
    pub fn users(&self) -> &Arc<dyn UserStore> {
        &self.users
    }

    /// Registers a new user and issues a session token for them.
    ///
    /// No token is issued if the username is taken or the store fails.
    #[instrument(name = "registering", skip_all, fields(username = %username))]
    pub async fn register(&self, username: &str, password: &str) -> AppResult<IssuedToken> {
        self.policy.validate(username, password)?;

        let password_hash = self.hash_blocking(password).await?;

        let user = self
            .users
            .create(&CreateUser::new(username, password_hash))
            .await
            .inspect_err(|e| match e.kind {
                ErrorKind::Conflict => warn!("Registration rejected: username taken"),
                _ => error!(error = %e, "Registration failed in user store"),
            })?;

        let issued = self.encoder.issue(&user.username)?;
        info!(user_id = %user.id, expires_at = %issued.claims.expires_at(), "User registered");
        Ok(issued)
    }

    /// Authenticates credentials and issues a session token.
    ///
    /// Unknown usernames and wrong passwords fail identically.
    #[instrument(name = "logging_in", skip_all, fields(username = %username))]
    pub async fn login(&self, username: &str, password: &str) -> AppResult<IssuedToken> {
        self.policy.validate(username, password)?;

        let user = match self.users.find_by_username(username).await {
            Ok(user) => Some(user),
            Err(e) if e.is(ErrorKind::NotFound) => None,
            Err(e) => {
                error!(error = %e, "Login failed in user store");
                return Err(e);
            }
        };

        let stored_hash = match &user {
            Some(user) => user.password_hash.clone(),
            None => self.decoy_hash.to_string(),
        };
        let matched = self.verify_blocking(password, stored_hash).await?;

        match user {
            Some(user) if matched => {
                let issued = self.encoder.issue(&user.username)?;
                info!(user_id = %user.id, "Login succeeded");
                Ok(issued)
            }
            Some(_) => {
                info!(reason = "password_mismatch", "Login rejected");
                Err(login_failure())
            }
            None => {
                info!(reason = "unknown_user", "Login rejected");
                Err(login_failure())
            }
        }
    }

    /// Validates a presented token and returns its claims.
    ///
    /// Purely token-local: the user store is not consulted.
    #[instrument(name = "validating", skip_all)]
    pub fn check_session(&self, token: Option<&str>) -> AppResult<Claims> {
        let Some(token) = token else {
            debug!("No session token presented");
            return Err(AppError::authentication(UNAUTHORIZED_MESSAGE));
        };

        let claims = self.decoder.validate(token).map_err(|reason| {
            debug!(%reason, "Session token rejected");
            AppError::from(reason)
        })?;

        debug!(
            subject = %claims.subject(),
            issued_at = %claims.issued_at(),
            expires_at = %claims.expires_at(),
            "Session token accepted"
        );
        Ok(claims)
    }

    /// Ends the caller's session. Always succeeds.
    ///
    /// The server keeps no session state, so this only records the event;
    /// the transport tells the client to discard its token.
    #[instrument(name = "logging_out", skip_all)]
    pub fn logout(&self, token: Option<&str>) {
        match token.map(|t| self.decoder.validate(t)) {
            Some(Ok(claims)) => info!(subject = %claims.sub, "Session discarded"),
            Some(Err(reason)) => debug!(%reason, "Logout with unusable token"),
            None => debug!("Logout without token"),
        }
    }

    async fn hash_blocking(&self, password: &str) -> AppResult<String> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hasher.hash_password(&password))
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Hashing task failed", e))?
    }

    async fn verify_blocking(&self, password: &str, hash: String) -> AppResult<bool> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hasher.verify_password(&password, &hash))
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Verification task failed", e))?
    }
}

fn login_failure() -> AppError {
    AppError::authentication(LOGIN_FAILURE_MESSAGE)
}
