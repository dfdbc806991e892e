use std::sync::Arc;

use tracing::{info, warn};

use crate::auth::dto::{CreateUserRequest, LoginRequest, LoginResponse, MessageResponse};
use crate::auth::password::{verify_password, HashScheme};
use crate::auth::token::mint_session_token;
use crate::error::{ApiError, ApiResult};
use crate::users::model::{NewUser, PublicUser};
use crate::users::store::UserStore;

/// The one message returned for every credential failure. Unknown email and
/// wrong password are indistinguishable from the outside.
pub const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Registration and login workflow over a [`UserStore`].
///
/// Constructed by the composition root with an explicit store and hashing
/// scheme; handlers hold a clone and nothing else.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
    hasher: HashScheme,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, hasher: HashScheme) -> Self {
        Self { store, hasher }
    }

    /// Register a new user: uniqueness checks, hash, persist.
    ///
    /// The existence checks are read-then-write and not atomic; a racing
    /// registration can pass both and then hit the unique constraint at
    /// insert, which the store reports as `Conflict` as well.
    pub async fn register(&self, req: CreateUserRequest) -> ApiResult<PublicUser> {
        let username = req.username.trim();
        let email = req.email.trim();

        if username.is_empty() {
            return Err(ApiError::validation("username is required"));
        }
        if email.is_empty() {
            return Err(ApiError::validation("email is required"));
        }
        if req.password.trim().is_empty() {
            return Err(ApiError::validation("password is required"));
        }

        if self.store.exists_by_email(email).await? {
            warn!(email, "registration with taken email");
            return Err(ApiError::conflict("email taken"));
        }
        if self.store.exists_by_username(username).await? {
            warn!(username, "registration with taken username");
            return Err(ApiError::conflict("username taken"));
        }

        // The plaintext stops here; only the hash is persisted or logged.
        let password_hash = self.hasher.hash(&req.password)?;

        let user = self
            .store
            .insert(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await?;

        info!(user_id = user.id, username = %user.username, "user registered");
        Ok(PublicUser::from(user))
    }

    /// Authenticate by email and password and mint a session token.
    pub async fn login(&self, req: LoginRequest) -> ApiResult<LoginResponse> {
        if req.email.trim().is_empty() {
            return Err(ApiError::validation("email is required"));
        }
        if req.password.trim().is_empty() {
            return Err(ApiError::validation("password is required"));
        }

        let user = match self.store.find_by_email(req.email.trim()).await? {
            Some(u) => u,
            None => {
                warn!("login with unknown email");
                return Err(ApiError::auth(INVALID_CREDENTIALS));
            }
        };

        if !verify_password(&req.password, &user.password_hash)? {
            warn!(user_id = user.id, "login with wrong password");
            return Err(ApiError::auth(INVALID_CREDENTIALS));
        }

        let token = mint_session_token(user.id);
        info!(user_id = user.id, "user logged in");
        Ok(LoginResponse {
            message: "login successful".into(),
            user: PublicUser::from(user),
            token,
        })
    }

    /// Stateless logout. There is no server-side session to invalidate.
    pub fn logout(&self) -> MessageResponse {
        MessageResponse::new("logout successful")
    }

    /// Resolve the current user from an Authorization header value.
    ///
    /// Only presence is checked. The token is neither decoded nor verified,
    /// so this cannot actually identify anyone yet.
    pub fn current_user(&self, authorization: Option<&str>) -> ApiResult<MessageResponse> {
        match authorization {
            Some(token) if !token.trim().is_empty() => {
                Ok(MessageResponse::new("token validation not implemented"))
            }
            _ => Err(ApiError::auth("missing token")),
        }
    }

    /// Unconditional liveness message.
    pub fn status(&self) -> MessageResponse {
        MessageResponse::new("authentication service is up")
    }
}
