//! User repository implementation

use sqlx::{PgConnection, PgPool};
use crate::models::user::{NewUser, Role, User};
use crate::utils::errors::RetakeError;

const USER_COLUMNS: &str = "id, name, surname, lastname, login, email, password, role, department_id, specialization_id";

#[derive(Clone, Debug)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user; `user.password` must already be hashed
    pub async fn create_in(&self, conn: &mut PgConnection, user: &NewUser) -> Result<User, RetakeError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO app_user (name, surname, lastname, login, email, password, role, department_id, specialization_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(user.name.trim())
        .bind(user.surname.trim())
        .bind(user.lastname.trim())
        .bind(user.login.trim())
        .bind(user.email.trim())
        .bind(&user.password)
        .bind(user.role.as_str())
        .bind(user.department_id)
        .bind(user.specialization_id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(user)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, RetakeError> {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {} FROM app_user WHERE id = $1", USER_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn find_by_login(&self, login: &str) -> Result<Option<User>, RetakeError> {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {} FROM app_user WHERE login = $1", USER_COLUMNS))
            .bind(login)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, RetakeError> {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {} FROM app_user WHERE email = $1", USER_COLUMNS))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn find_all(&self) -> Result<Vec<User>, RetakeError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM app_user ORDER BY surname ASC, name ASC",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    pub async fn find_all_by_role(&self, role: Role) -> Result<Vec<User>, RetakeError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM app_user WHERE role = $1 ORDER BY surname ASC, name ASC",
            USER_COLUMNS
        ))
        .bind(role.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Replace the profile fields; role is left untouched
    pub async fn update(&self, id: i32, user: &NewUser) -> Result<Option<User>, RetakeError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE app_user
            SET name = $2,
                surname = $3,
                lastname = $4,
                login = $5,
                email = $6,
                password = $7,
                department_id = $8,
                specialization_id = $9
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(id)
        .bind(user.name.trim())
        .bind(user.surname.trim())
        .bind(user.lastname.trim())
        .bind(user.login.trim())
        .bind(user.email.trim())
        .bind(&user.password)
        .bind(user.department_id)
        .bind(user.specialization_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Delete a user; retakes, history and sign-ups cascade
    pub async fn delete_in(&self, conn: &mut PgConnection, id: i32) -> Result<bool, RetakeError> {
        let result = sqlx::query("DELETE FROM app_user WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
