//! Token and password implementations behind the `gym-core` auth traits.

pub mod jwt;
pub mod password;

pub use jwt::JwtTokenIssuer;
pub use password::Argon2PasswordEncoder;
