// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Redacting wrapper for the session token.
//!
//! The token authenticates analytics requests and must never appear in
//! logs. [`SecretString`] redacts Debug and Display output, zeroes its
//! memory on drop, and only yields the raw value through an explicit
//! [`expose`](SecretString::expose) call.

use std::fmt;

use zeroize::Zeroize;

/// The redaction placeholder used in all output.
pub const REDACTED: &str = "[REDACTED]";

/// A session token that refuses to print itself.
#[derive(Clone, PartialEq, Eq, Zeroize)]
#[zeroize(drop)]
pub struct SecretString(String);

impl SecretString {
	/// Wraps a sensitive string.
	pub fn new(inner: impl Into<String>) -> Self {
		Self(inner.into())
	}

	/// Explicitly accesses the raw value.
	///
	/// Call sites opt in to seeing the secret, which keeps token access
	/// visible in review.
	pub fn expose(&self) -> &str {
		&self.0
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("SecretString").field(&REDACTED).finish()
	}
}

impl fmt::Display for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}
