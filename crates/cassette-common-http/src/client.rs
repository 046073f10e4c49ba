// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP client with consistent User-Agent header.

use reqwest::{Client, ClientBuilder};

/// Creates a new HTTP client with the standard Cassette User-Agent header.
///
/// The User-Agent format is: `cassette/{platform}/{version}`
/// Example: `cassette/linux-x86_64/0.1.0`
pub fn new_client() -> Client {
	builder().build().expect("failed to build HTTP client")
}

/// Creates an HTTP client builder carrying the standard Cassette
/// User-Agent, for callers that need further customization.
///
/// # Example
/// ```ignore
/// let client = cassette_common_http::builder()
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Returns the standard Cassette User-Agent string.
///
/// Format: `cassette/{platform}/{version}`
pub fn user_agent() -> String {
	format!(
		"cassette/{}-{}/{}",
		std::env::consts::OS,
		std::env::consts::ARCH,
		env!("CARGO_PKG_VERSION")
	)
}
