pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{LoginAttempt, Session, User, UserProfile};
pub use errors::{AuthError, RepositoryError};
pub use services::{AuthService, AuthServiceConfig, ProfileUpdate};
pub use value_objects::{Email, Password, PasswordHash, SessionToken, TokenHash};
