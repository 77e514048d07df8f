//! # Auth Service
//!
//! Registration, login and token-keyed profile management.
//!
//! The service owns no cryptography: tokens come from a [`TokenIssuer`],
//! password hashes from a [`PasswordEncoder`], and the login credential
//! check is delegated to an [`Authenticator`].

use crate::error::RepositoryError;
use crate::user::{
    AuthResponse, BoxedUserRepository, ChangePasswordRequest, LoginRequest, NewUser,
    ProfileUpdateRequest, RegisterRequest, User, UserProfile, DEFAULT_ROLE,
};
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Email is already taken!")]
    Conflict,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Current password is incorrect")]
    IncorrectPassword,

    #[error("Token issue failed: {0}")]
    TokenIssue(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl AuthError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::Validation(_) | AuthError::IncorrectPassword => 400,
            AuthError::InvalidCredentials | AuthError::InvalidToken(_) => 401,
            AuthError::UserNotFound => 404,
            AuthError::Conflict => 409,
            AuthError::TokenIssue(_) | AuthError::PasswordHash(_) => 500,
            AuthError::Repository(RepositoryError::Conflict(_)) => 409,
            AuthError::Repository(RepositoryError::NotFound(_)) => 404,
            AuthError::Repository(RepositoryError::Backend(_)) => 500,
        }
    }
}

pub type AuthResult<T> = Result<T, AuthError>;

/// Issues and parses bearer tokens whose subject is the user's email.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, email: &str) -> AuthResult<String>;

    /// Validate a token and return its subject
    fn subject(&self, token: &str) -> AuthResult<String>;
}

/// One-way password hashing.
pub trait PasswordEncoder: Send + Sync {
    fn encode(&self, raw: &str) -> AuthResult<String>;

    fn matches(&self, raw: &str, hash: &str) -> bool;
}

/// Credential check used by login.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, email: &str, password: &str) -> AuthResult<User>;
}

/// Authenticates against the user store with a password encoder.
pub struct PasswordAuthenticator {
    users: BoxedUserRepository,
    encoder: Arc<dyn PasswordEncoder>,
}

impl PasswordAuthenticator {
    pub fn new(users: BoxedUserRepository, encoder: Arc<dyn PasswordEncoder>) -> Self {
        Self { users, encoder }
    }
}

#[async_trait]
impl Authenticator for PasswordAuthenticator {
    async fn authenticate(&self, email: &str, password: &str) -> AuthResult<User> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if self.encoder.matches(password, &user.password_hash) {
            Ok(user)
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

#[derive(Clone)]
pub struct AuthService {
    users: BoxedUserRepository,
    encoder: Arc<dyn PasswordEncoder>,
    authenticator: Arc<dyn Authenticator>,
    tokens: Arc<dyn TokenIssuer>,
}

impl AuthService {
    pub fn new(
        users: BoxedUserRepository,
        encoder: Arc<dyn PasswordEncoder>,
        authenticator: Arc<dyn Authenticator>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            encoder,
            authenticator,
            tokens,
        }
    }

    /// Wire the service with a [`PasswordAuthenticator`] over the same store
    /// and encoder.
    pub fn with_password_login(
        users: BoxedUserRepository,
        encoder: Arc<dyn PasswordEncoder>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        let authenticator = Arc::new(PasswordAuthenticator::new(users.clone(), encoder.clone()));
        Self::new(users, encoder, authenticator, tokens)
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> AuthResult<AuthResponse> {
        if request.email.trim().is_empty() {
            return Err(AuthError::Validation("email is required".to_string()));
        }
        if request.password.is_empty() {
            return Err(AuthError::Validation("password is required".to_string()));
        }
        if self.users.exists_by_email(&request.email).await? {
            warn!("Registration rejected: email already taken");
            return Err(AuthError::Conflict);
        }

        let user = self
            .users
            .insert(NewUser {
                email: request.email,
                password_hash: self.encoder.encode(&request.password)?,
                first_name: request.first_name,
                last_name: request.last_name,
                weight: request.weight,
                height: request.height,
                fitness_goal: request.fitness_goal,
                roles: BTreeSet::from([DEFAULT_ROLE.to_string()]),
            })
            .await
            .map_err(|err| match err {
                RepositoryError::Conflict(_) => AuthError::Conflict,
                other => AuthError::Repository(other),
            })?;

        info!("Registered user {}", user.id);
        let token = self.tokens.issue(&user.email)?;
        Ok(AuthResponse::for_user(token, &user))
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> AuthResult<AuthResponse> {
        let user = self
            .authenticator
            .authenticate(&request.email, &request.password)
            .await?;
        let token = self.tokens.issue(&user.email)?;
        Ok(AuthResponse::for_user(token, &user))
    }

    pub async fn profile(&self, token: &str) -> AuthResult<UserProfile> {
        let user = self.user_for_token(token).await?;
        Ok(UserProfile::from(&user))
    }

    #[instrument(skip(self, token, update))]
    pub async fn update_profile(
        &self,
        token: &str,
        update: ProfileUpdateRequest,
    ) -> AuthResult<UserProfile> {
        let mut user = self.user_for_token(token).await?;
        update.apply_to(&mut user);
        let saved = self.users.update(&user).await?;
        Ok(UserProfile::from(&saved))
    }

    #[instrument(skip(self, token, request))]
    pub async fn change_password(
        &self,
        token: &str,
        request: ChangePasswordRequest,
    ) -> AuthResult<()> {
        let mut user = self.user_for_token(token).await?;
        if !self
            .encoder
            .matches(&request.current_password, &user.password_hash)
        {
            return Err(AuthError::IncorrectPassword);
        }
        if request.new_password.is_empty() {
            return Err(AuthError::Validation("new password is required".to_string()));
        }

        user.password_hash = self.encoder.encode(&request.new_password)?;
        self.users.update(&user).await?;
        info!("Password changed for user {}", user.id);
        Ok(())
    }

    #[instrument(skip(self, token))]
    pub async fn delete_account(&self, token: &str) -> AuthResult<()> {
        let user = self.user_for_token(token).await?;
        self.users.delete(user.id).await?;
        info!("Deleted user {}", user.id);
        Ok(())
    }

    async fn user_for_token(&self, token: &str) -> AuthResult<User> {
        let email = self.tokens.subject(token)?;
        self.users
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryUserRepository;
    use crate::user::UserRepository;

    /// Token is `token:<email>`
    struct PlainTokens;

    impl TokenIssuer for PlainTokens {
        fn issue(&self, email: &str) -> AuthResult<String> {
            Ok(format!("token:{email}"))
        }

        fn subject(&self, token: &str) -> AuthResult<String> {
            token
                .strip_prefix("token:")
                .map(String::from)
                .ok_or_else(|| AuthError::InvalidToken("malformed".into()))
        }
    }

    /// Hash is the reversed password
    struct ReversingEncoder;

    impl PasswordEncoder for ReversingEncoder {
        fn encode(&self, raw: &str) -> AuthResult<String> {
            Ok(raw.chars().rev().collect())
        }

        fn matches(&self, raw: &str, hash: &str) -> bool {
            raw.chars().rev().collect::<String>() == hash
        }
    }

    fn service() -> (AuthService, Arc<InMemoryUserRepository>) {
        let users = Arc::new(InMemoryUserRepository::new());
        let service = AuthService::with_password_login(
            users.clone(),
            Arc::new(ReversingEncoder),
            Arc::new(PlainTokens),
        );
        (service, users)
    }

    fn registration(email: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: "secret1".to_string(),
            first_name: Some("Ann".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_register_then_conflict() {
        let (auth, users) = service();

        let response = auth.register(registration("ann@example.com")).await.unwrap();
        assert_eq!(response.token, "token:ann@example.com");
        assert_eq!(response.first_name.as_deref(), Some("Ann"));

        let stored = users.find_by_email("ann@example.com").await.unwrap().unwrap();
        assert_eq!(stored.password_hash, "1terces");
        assert!(stored.roles.contains(DEFAULT_ROLE));

        let err = auth.register(registration("ann@example.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::Conflict));
        assert_eq!(err.status_code(), 409);
    }

    #[tokio::test]
    async fn test_register_requires_credentials() {
        let (auth, _) = service();
        let err = auth.register(registration("  ")).await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
    }

    #[tokio::test]
    async fn test_login() {
        let (auth, _) = service();
        auth.register(registration("ann@example.com")).await.unwrap();

        let response = auth
            .login(LoginRequest {
                email: "ann@example.com".into(),
                password: "secret1".into(),
            })
            .await
            .unwrap();
        assert_eq!(response.email, "ann@example.com");

        let err = auth
            .login(LoginRequest {
                email: "ann@example.com".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));

        let err = auth
            .login(LoginRequest {
                email: "nobody@example.com".into(),
                password: "secret1".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_profile_roundtrip() {
        let (auth, _) = service();
        let token = auth.register(registration("ann@example.com")).await.unwrap().token;

        let updated = auth
            .update_profile(
                &token,
                ProfileUpdateRequest {
                    fitness_goal: Some("bulk".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.fitness_goal.as_deref(), Some("bulk"));
        assert_eq!(updated.first_name.as_deref(), Some("Ann"));

        let profile = auth.profile(&token).await.unwrap();
        assert_eq!(profile, updated);

        let err = auth.profile("garbage").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));

        let err = auth.profile("token:ghost@example.com").await.unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }

    #[tokio::test]
    async fn test_change_password() {
        let (auth, _) = service();
        let token = auth.register(registration("ann@example.com")).await.unwrap().token;

        let err = auth
            .change_password(
                &token,
                ChangePasswordRequest {
                    current_password: "nope".into(),
                    new_password: "secret2".into(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::IncorrectPassword));

        auth.change_password(
            &token,
            ChangePasswordRequest {
                current_password: "secret1".into(),
                new_password: "secret2".into(),
            },
        )
        .await
        .unwrap();

        let login = auth
            .login(LoginRequest {
                email: "ann@example.com".into(),
                password: "secret2".into(),
            })
            .await;
        assert!(login.is_ok());
    }

    #[tokio::test]
    async fn test_delete_account() {
        let (auth, users) = service();
        let token = auth.register(registration("ann@example.com")).await.unwrap().token;

        auth.delete_account(&token).await.unwrap();
        assert!(!users.exists_by_email("ann@example.com").await.unwrap());

        let err = auth.delete_account(&token).await.unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));

        // the email is free again
        auth.register(registration("ann@example.com")).await.unwrap();
    }
}
