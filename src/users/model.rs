use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,                   // unique user ID, assigned by the store
    pub username: String,          // unique display name
    pub email: String,             // unique login identifier
    #[serde(skip_serializing)]
    pub password_hash: String,     // Argon2 PHC string or legacy {noop} marker
}

/// Fields needed to insert a user; the id comes back from the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Public part of the user returned to clients. The hash is excluded
/// unconditionally, on every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicUser {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}
