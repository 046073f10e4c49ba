// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the analytics SDK.

use thiserror::Error;

/// Key-value storage backend errors.
#[derive(Debug, Error)]
pub enum StoreError {
	/// I/O error reading or writing the backing file.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// Stored payload could not be serialized.
	#[error("serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

/// Analytics SDK errors.
///
/// Analytics is best-effort: callers at the call-site are expected to log
/// these and carry on, never to interrupt the user-facing flow. A failed
/// request is final; the SDK does not retry.
#[derive(Debug, Error)]
pub enum AnalyticsError {
	/// Base URL is missing, a placeholder, or unparseable.
	#[error("invalid base URL: {0}")]
	InvalidBaseUrl(String),

	/// The HTTP request could not be sent.
	#[error("analytics request failed: {0}")]
	Transport(#[from] reqwest::Error),

	/// The backend answered with a non-success status.
	#[error("analytics request failed with status {status}")]
	Status { status: u16 },
}

/// Result type alias for analytics operations.
pub type Result<T> = std::result::Result<T, AnalyticsError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn status_error_carries_the_code() {
		let err = AnalyticsError::Status { status: 503 };
		assert_eq!(err.to_string(), "analytics request failed with status 503");
	}

	#[test]
	fn store_error_wraps_io() {
		let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
		let err = StoreError::from(io);
		assert!(matches!(err, StoreError::Io(_)));
		assert!(err.to_string().contains("denied"));
	}

	#[test]
	fn invalid_base_url_mentions_the_reason() {
		let err = AnalyticsError::InvalidBaseUrl("relative URL without a base".to_string());
		assert!(err.to_string().contains("invalid base URL"));
	}
}
