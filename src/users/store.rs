use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::ApiResult;
use crate::users::model::{NewUser, User};

/// Persistence seam for the single `users` table.
///
/// The service layer only talks to this trait; production wires in
/// [`PgUserStore`], tests an in-memory implementation.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn exists_by_email(&self, email: &str) -> ApiResult<bool>;
    async fn exists_by_username(&self, username: &str) -> ApiResult<bool>;
    async fn find_by_email(&self, email: &str) -> ApiResult<Option<User>>;
    async fn find_by_username(&self, username: &str) -> ApiResult<Option<User>>;
    /// Insert a user and return it with its assigned id. A unique violation
    /// at the database surfaces as `ApiError::Conflict`.
    async fn insert(&self, new_user: NewUser) -> ApiResult<User>;
    async fn list_all(&self) -> ApiResult<Vec<User>>;
}

/// Postgres-backed store.
#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn exists_by_email(&self, email: &str) -> ApiResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)"#,
        )
        .bind(email)
        .fetch_one(&self.db)
        .await?;
        Ok(exists)
    }

    async fn exists_by_username(&self, username: &str) -> ApiResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)"#,
        )
        .bind(username)
        .fetch_one(&self.db)
        .await?;
        Ok(exists)
    }

    async fn find_by_email(&self, email: &str) -> ApiResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> ApiResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn insert(&self, new_user: NewUser) -> ApiResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .fetch_one(&self.db)
        .await?;
        Ok(user)
    }

    async fn list_all(&self) -> ApiResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(users)
    }
}

/// In-memory store for service tests. Enforces the same uniqueness
/// invariants at insert time that the database constraints do, so race
/// handling can be exercised without Postgres.
#[cfg(test)]
pub struct MemoryUserStore {
    inner: std::sync::Mutex<MemoryInner>,
}

#[cfg(test)]
struct MemoryInner {
    users: Vec<User>,
    next_id: i64,
}

#[cfg(test)]
impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            inner: std::sync::Mutex::new(MemoryInner {
                users: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl UserStore for MemoryUserStore {
    async fn exists_by_email(&self, email: &str) -> ApiResult<bool> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().any(|u| u.email == email))
    }

    async fn exists_by_username(&self, username: &str) -> ApiResult<bool> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().any(|u| u.username == username))
    }

    async fn find_by_email(&self, email: &str) -> ApiResult<Option<User>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> ApiResult<Option<User>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.username == username).cloned())
    }

    async fn insert(&self, new_user: NewUser) -> ApiResult<User> {
        use crate::error::ApiError;

        let mut inner = self.inner.lock().unwrap();
        if inner
            .users
            .iter()
            .any(|u| u.email == new_user.email || u.username == new_user.username)
        {
            return Err(ApiError::conflict("user already exists"));
        }
        let user = User {
            id: inner.next_id,
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
        };
        inner.next_id += 1;
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn list_all(&self) -> ApiResult<Vec<User>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    #[tokio::test]
    async fn memory_store_assigns_sequential_ids() {
        let store = MemoryUserStore::new();
        let a = store
            .insert(NewUser {
                username: "alice".into(),
                email: "alice@x.com".into(),
                password_hash: "h1".into(),
            })
            .await
            .unwrap();
        let b = store
            .insert(NewUser {
                username: "bob".into(),
                email: "bob@x.com".into(),
                password_hash: "h2".into(),
            })
            .await
            .unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn memory_store_rejects_duplicate_at_insert() {
        let store = MemoryUserStore::new();
        store
            .insert(NewUser {
                username: "alice".into(),
                email: "alice@x.com".into(),
                password_hash: "h1".into(),
            })
            .await
            .unwrap();

        // Same email through a path that skipped the existence checks.
        let err = store
            .insert(NewUser {
                username: "other".into(),
                email: "alice@x.com".into(),
                password_hash: "h2".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn exists_and_find_agree() {
        let store = MemoryUserStore::new();
        assert!(!store.exists_by_email("alice@x.com").await.unwrap());
        assert!(store.find_by_username("alice").await.unwrap().is_none());

        store
            .insert(NewUser {
                username: "alice".into(),
                email: "alice@x.com".into(),
                password_hash: "h".into(),
            })
            .await
            .unwrap();

        assert!(store.exists_by_email("alice@x.com").await.unwrap());
        assert!(store.exists_by_username("alice").await.unwrap());
        let found = store.find_by_email("alice@x.com").await.unwrap().unwrap();
        assert_eq!(found.username, "alice");
    }
}
