//! Request and response models of the RotaFácil HTTP API, shared by the
//! smoke-test CLI and its tests.

pub mod auth;
mod lenient;
pub mod route;

pub use auth::{
    AuthResponse, LoginRequest, RegisterStudentRequest, SessionToken, UserId, UserInfo,
};
pub use route::RouteSummary;

/// Placeholder rendered for fields the server left out of a response.
pub const NOT_AVAILABLE: &str = "N/A";
