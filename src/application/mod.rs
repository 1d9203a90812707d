//! Application layer services.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! - [`services::user_service::UserService`] - User listing and lifecycle

pub mod services;
