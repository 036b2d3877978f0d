//! Client identity: identifiers, credentials, signed client secrets, and issued tokens.

pub mod client_secret;
pub mod credentials;
pub mod id;
pub mod secret;
pub mod token;

pub use client_secret::*;
pub use credentials::*;
pub use id::*;
pub use secret::*;
pub use token::*;
