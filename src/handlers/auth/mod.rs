mod login;
mod me;
mod register;

pub use login::login;
pub use me::me;
pub use register::register;

use serde::{Deserialize, Serialize};

use crate::database::models::PublicUser;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of successful register/login responses.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}
