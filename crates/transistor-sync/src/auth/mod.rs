//! Sign-in session handling
//!
//! Caches the signed-in account and builds the consent request. The
//! interactive consent flow itself runs in the browser, outside this crate.

pub mod session;

// Re-export commonly used types
pub use session::{Session, SessionStore, SignInRequest};
