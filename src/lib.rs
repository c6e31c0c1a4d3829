//! Pick up to three movies, ask the recommendation backend for matches, and
//! show the ranked result.

pub mod config;
pub mod console;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod session;
pub mod view;

pub use config::Config;
pub use error::{BackendError, RecommendationError, SessionError};
pub use session::{SessionController, SessionEvent, SessionState};
