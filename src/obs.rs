//! Optional observability helpers for provider calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `appleid.call` with the `call` (operation)
//!   and `stage` (call site) fields.
//! - Enable `metrics` to increment the `appleid_client_call_total` counter for every
//!   attempt/success/failure, labeled by `call` + `outcome`.
//!
//! Neither layer records token material.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::{_prelude::*, provider::GrantType};

/// Provider operations observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// Authorization-code exchange.
	AuthorizationCode,
	/// Refresh-token exchange.
	RefreshToken,
	/// Token revocation.
	Revocation,
	/// Public key set retrieval.
	PublicKeys,
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::AuthorizationCode => "authorization_code",
			CallKind::RefreshToken => "refresh_token",
			CallKind::Revocation => "revocation",
			CallKind::PublicKeys => "public_keys",
		}
	}
}
impl From<GrantType> for CallKind {
	fn from(grant: GrantType) -> Self {
		match grant {
			GrantType::AuthorizationCode => CallKind::AuthorizationCode,
			GrantType::RefreshToken => CallKind::RefreshToken,
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a client operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
