// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the analytics core types.

use thiserror::Error;

/// Errors that can occur when parsing analytics core types.
#[derive(Debug, Error)]
pub enum CoreError {
	/// Unrecognized music platform string
	#[error("unrecognized music platform: {0}")]
	UnknownPlatform(String),

	/// Anonymous ids must carry at least one non-whitespace character
	#[error("anonymous id must not be empty")]
	EmptyAnonymousId,
}
