//! User repository backed by the `users` table.

use async_trait::async_trait;
use gym_core::{NewUser, RepositoryError, User, UserRepository};
use sqlx::{FromRow, PgPool};

use super::repository_error;

const USER_COLUMNS: &str = "id, email, password_hash, first_name, last_name, weight, height, \
                            fitness_goal, age, profile_picture, roles";

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    email: String,
    password_hash: String,
    first_name: Option<String>,
    last_name: Option<String>,
    weight: Option<f64>,
    height: Option<f64>,
    fitness_goal: Option<String>,
    age: Option<i32>,
    profile_picture: Option<String>,
    roles: Vec<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            first_name: row.first_name,
            last_name: row.last_name,
            weight: row.weight,
            height: row.height,
            fitness_goal: row.fitness_goal,
            age: row.age,
            profile_picture: row.profile_picture,
            roles: row.roles.into_iter().collect(),
        }
    }
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(repository_error)?;

        Ok(row.map(User::from))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, RepositoryError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(repository_error)
    }

    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError> {
        let roles: Vec<String> = user.roles.into_iter().collect();
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users \
                 (email, password_hash, first_name, last_name, weight, height, fitness_goal, roles) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.weight)
        .bind(user.height)
        .bind(&user.fitness_goal)
        .bind(&roles)
        .fetch_one(&self.pool)
        .await
        .map_err(repository_error)?;

        Ok(row.into())
    }

    async fn update(&self, user: &User) -> Result<User, RepositoryError> {
        let roles: Vec<String> = user.roles.iter().cloned().collect();
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users SET \
                 email = $2, password_hash = $3, first_name = $4, last_name = $5, weight = $6, \
                 height = $7, fitness_goal = $8, age = $9, profile_picture = $10, roles = $11 \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.weight)
        .bind(user.height)
        .bind(&user.fitness_goal)
        .bind(user.age)
        .bind(&user.profile_picture)
        .bind(&roles)
        .fetch_one(&self.pool)
        .await
        .map_err(repository_error)?;

        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(repository_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("user {id}")));
        }
        Ok(())
    }
}
