//! Users domain methods on Repository

use chrono::Utc;
use sqlx::PgConnection;

use super::{pagination, Repository};
use crate::{
    error::{AppError, AppResult},
    models::{
        enums::Role,
        user::{CreateUser, UpdateUser, User, UserQuery, UserShort},
    },
};

/// Flip the VIP flag inside the caller's transaction
pub(crate) async fn set_vip(conn: &mut PgConnection, id: i32, is_vip: bool) -> AppResult<()> {
    let result = sqlx::query("UPDATE users SET is_vip = $2, modif_date = $3 WHERE id = $1")
        .bind(id)
        .bind(is_vip)
        .bind(Utc::now())
        .execute(&mut *conn)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("User with id {} not found", id)));
    }
    Ok(())
}

impl Repository {
    /// Get user by ID
    pub async fn users_get_by_id(&self, id: i32) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Get user by email (case-insensitive)
    pub async fn users_get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Check if email already exists
    pub async fn users_email_exists(&self, email: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM users
                WHERE LOWER(email) = LOWER($1) AND ($2::INTEGER IS NULL OR id != $2)
            )
            "#,
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Search users with pagination
    pub async fn users_search(&self, query: &UserQuery) -> AppResult<(Vec<UserShort>, i64)> {
        let (_, per_page, offset) = pagination(query.page, query.per_page);
        let pattern = query.name.as_ref().map(|n| format!("%{}%", n.to_lowercase()));
        let role = query.role.map(|r| r.as_str());

        let filter = r#"
            WHERE ($1::TEXT IS NULL
                   OR LOWER(COALESCE(firstname, '')) LIKE $1
                   OR LOWER(COALESCE(lastname, '')) LIKE $1
                   OR LOWER(email) LIKE $1)
              AND ($2::TEXT IS NULL OR role = $2)
        "#;

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM users {}", filter))
            .bind(&pattern)
            .bind(role)
            .fetch_one(&self.pool)
            .await?;

        let users = sqlx::query_as::<_, UserShort>(&format!(
            "SELECT id, email, firstname, lastname, role, is_vip FROM users {} ORDER BY lastname, firstname, id LIMIT $3 OFFSET $4",
            filter
        ))
        .bind(&pattern)
        .bind(role)
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((users, total))
    }

    /// Create a new user with an already hashed password
    pub async fn users_create(&self, user: &CreateUser, password_hash: &str, role: Role) -> AppResult<User> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password, firstname, lastname, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&user.email)
        .bind(password_hash)
        .bind(&user.firstname)
        .bind(&user.lastname)
        .bind(role)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    /// Update a user; `None` fields are left untouched
    pub async fn users_update(&self, id: i32, user: &UpdateUser, password_hash: Option<String>) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                email = COALESCE($2, email),
                password = COALESCE($3, password),
                firstname = COALESCE($4, firstname),
                lastname = COALESCE($5, lastname),
                role = COALESCE($6, role),
                is_vip = COALESCE($7, is_vip),
                modif_date = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&user.email)
        .bind(password_hash)
        .bind(&user.firstname)
        .bind(&user.lastname)
        .bind(user.role.map(|r| r.as_str()))
        .bind(user.is_vip)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Delete a user (cascades to owned rows)
    pub async fn users_delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User with id {} not found", id)));
        }
        Ok(())
    }
}
