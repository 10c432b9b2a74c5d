//! Firebase Authentication provider for mycal.
//!
//! Talks to the Identity Toolkit REST API for email/password accounts,
//! runs Google's OAuth flow in the browser for federated sign-in, and keeps
//! the refresh token in a session file so the next run starts signed in.

pub mod api;
pub mod error;
pub mod oauth;
pub mod provider;
pub mod session;

pub use error::{FirebaseError, FirebaseResult};
pub use provider::FirebaseProvider;
