//! # User Types
//!
//! Credential entity, request/response payloads for the auth endpoints, and
//! the user repository trait.

use crate::error::RepositoryError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Role given to every newly registered user
pub const DEFAULT_ROLE: &str = "ROLE_USER";

/// A stored user with credentials
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub fitness_goal: Option<String>,
    pub age: Option<i32>,
    pub profile_picture: Option<String>,
    pub roles: BTreeSet<String>,
}

/// A user to be inserted; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub fitness_goal: Option<String>,
    pub roles: BTreeSet<String>,
}

impl NewUser {
    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            email: self.email,
            password_hash: self.password_hash,
            first_name: self.first_name,
            last_name: self.last_name,
            weight: self.weight,
            height: self.height,
            fitness_goal: self.fitness_goal,
            age: None,
            profile_picture: None,
            roles: self.roles,
        }
    }
}

/// Public view of a user: no password hash, no roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub fitness_goal: Option<String>,
    pub age: Option<i32>,
    pub profile_picture: Option<String>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            weight: user.weight,
            height: user.height,
            fitness_goal: user.fitness_goal.clone(),
            age: user.age,
            profile_picture: user.profile_picture.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub fitness_goal: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Partial profile update; only `Some` fields are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub fitness_goal: Option<String>,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

impl ProfileUpdateRequest {
    pub fn apply_to(self, user: &mut User) {
        if let Some(first_name) = self.first_name {
            user.first_name = Some(first_name);
        }
        if let Some(last_name) = self.last_name {
            user.last_name = Some(last_name);
        }
        if let Some(weight) = self.weight {
            user.weight = Some(weight);
        }
        if let Some(height) = self.height {
            user.height = Some(height);
        }
        if let Some(goal) = self.fitness_goal {
            user.fitness_goal = Some(goal);
        }
        if let Some(age) = self.age {
            user.age = Some(age);
        }
        if let Some(picture) = self.profile_picture {
            user.profile_picture = Some(picture);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Returned by login and register
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl AuthResponse {
    pub fn for_user(token: String, user: &User) -> Self {
        Self {
            token,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

/// Persistence for users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, RepositoryError>;

    /// Insert a new user; `RepositoryError::Conflict` if the email is taken
    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError>;

    /// Overwrite the stored row with the same id
    async fn update(&self, user: &User) -> Result<User, RepositoryError>;

    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}

pub type BoxedUserRepository = Arc<dyn UserRepository>;
