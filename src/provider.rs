//! Provider-facing configuration (data) and the closed enumerations spoken on the wire.
//!
//! `endpoints` exposes validated HTTPS endpoint sets whose defaults point at
//! `https://appleid.apple.com`, overridable for tests and proxies. `grant` defines the request
//! enumerations (`GrantType`, `TokenTypeHint`) and `response` the provider's error body.

pub mod endpoints;
pub mod grant;
pub mod response;

pub use endpoints::*;
pub use grant::*;
pub use response::*;
