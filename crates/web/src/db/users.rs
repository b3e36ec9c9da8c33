//! `PostgreSQL` user store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;

use bookrent_core::{Email, Rentals, UserId, Wishlist};

use super::{RepositoryError, UserStore};
use crate::models::{NewUser, User};

const USER_COLUMNS: &str =
    "id, name, email, password_hash, wishlist, rented_books, total_cost, created_at";

/// [`UserStore`] over the `users` table.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: UserId,
    name: String,
    email: String,
    password_hash: String,
    wishlist: Json<Wishlist>,
    rented_books: Json<Rentals>,
    total_cost: i64,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            name: row.name,
            email,
            password_hash: row.password_hash,
            wishlist: row.wishlist.0,
            rented_books: row.rented_books.0,
            total_cost: row.total_cost,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 ORDER BY id LIMIT 1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn insert(&self, user: NewUser) -> Result<UserId, RepositoryError> {
        sqlx::query_scalar::<_, UserId>(
            r"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id
            ",
        )
        .bind(&user.name)
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })
    }

    async fn get(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn update_wishlist(
        &self,
        id: UserId,
        wishlist: &Wishlist,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE users SET wishlist = $1 WHERE id = $2")
            .bind(Json(wishlist))
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn update_rented_books(
        &self,
        id: UserId,
        rented_books: &Rentals,
        total_cost: i64,
    ) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("UPDATE users SET rented_books = $1, total_cost = $2 WHERE id = $3")
                .bind(Json(rented_books))
                .bind(total_cost)
                .bind(id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
