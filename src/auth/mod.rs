//! Delete-password handling.

pub mod password;

pub use password::{
    hash_password, validate_password, verify_password, PasswordError, MAX_PASSWORD_LENGTH,
};
