//! Identity provider boundary.
//!
//! Sign-in, sign-up and session persistence are delegated to an external
//! provider implementing [`IdentityProvider`]. The rest of the app only sees
//! [`Identity`], [`AuthError`] and the [`Session`] published by
//! [`IdentityGateway`].

pub mod error;
pub mod gateway;
pub mod memory;
pub mod provider;

pub use error::{AuthError, AuthErrorCode, AuthResult, error_message};
pub use gateway::{IdentityGateway, Session};
pub use memory::MemoryProvider;
pub use provider::{Identity, IdentityProvider, SignInMethod};
