// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP client for the Cassette analytics backend.
//!
//! Every event kind has its own POST endpoint under
//! [`ANALYTICS_PREFIX`]. Properties are sanitized immediately before
//! send, so callers can hand over raw UI metadata without leaking
//! free text or query strings. A failed request is final; the SDK
//! never retries.

use std::sync::Arc;

use cassette_analytics_core::{sanitize, EventProps};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{AnalyticsError, Result};
use crate::identity::IdentityManager;
use crate::secret::SecretString;
use crate::store::{MemoryStore, SharedStore};

/// Path prefix shared by all analytics endpoints.
pub const ANALYTICS_PREFIX: &str = "/api/analytics";

/// Durable-store key holding the session token, when one exists.
pub const SESSION_TOKEN_KEY: &str = "cassette_session_token";

/// Base URL shipped in config templates; treated the same as unset.
const BASE_URL_PLACEHOLDER: &str = "https://cassette-api.example.com";

/// SDK name for the `X-Cassette-Lib` header.
const LIB_NAME: &str = "cassette-rust";
/// SDK version for the `X-Cassette-Lib-Version` header.
const LIB_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Backend acknowledgement for an event-recording call.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecordResponse {
	/// Whether the backend accepted the event.
	pub recorded: bool,
	/// Backend-supplied explanation when the event was not recorded.
	#[serde(default)]
	pub reason: Option<String>,
}

/// Aggregated counters for one profile.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileAnalyticsSummary {
	#[serde(default)]
	pub profile_views: u64,
	#[serde(default)]
	pub post_views: u64,
	#[serde(default)]
	pub link_clicks: u64,
}

/// Prefixes `path` with the configured backend base URL.
///
/// An unset or placeholder base yields `path` unchanged, leaving a
/// root-relative URL for deployments that proxy the analytics routes
/// under their own origin. A trailing slash on the base is dropped so
/// the join never doubles up.
pub fn endpoint_url(base_url: Option<&str>, path: &str) -> String {
	match base_url {
		Some(base) if !base.is_empty() && base != BASE_URL_PLACEHOLDER => {
			format!("{}{}", base.trim_end_matches('/'), path)
		}
		_ => path.to_string(),
	}
}

/// Builder for constructing an [`AnalyticsClient`].
pub struct AnalyticsClientBuilder {
	base_url: Option<String>,
	http: Option<Client>,
	durable: Option<SharedStore>,
	secondary: Option<SharedStore>,
}

impl AnalyticsClientBuilder {
	/// Creates a new builder with nothing configured.
	pub fn new() -> Self {
		Self {
			base_url: None,
			http: None,
			durable: None,
			secondary: None,
		}
	}

	/// Sets the backend base URL.
	///
	/// Example: `https://cassette.example.com`
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.base_url = Some(url.into());
		self
	}

	/// Overrides the HTTP client. Defaults to [`cassette_common_http::new_client`].
	pub fn http_client(mut self, client: Client) -> Self {
		self.http = Some(client);
		self
	}

	/// Sets the durable store.
	///
	/// Holds the anonymous id and the session token. Without one the
	/// client still records events, but no identity or auth headers
	/// are ever attached.
	pub fn durable_store(mut self, store: SharedStore) -> Self {
		self.durable = Some(store);
		self
	}

	/// Sets the secondary identity store.
	///
	/// The anonymous id is mirrored here so that wiping the durable
	/// store does not reset identity. Defaults to an in-process
	/// [`MemoryStore`] when only a durable store is given.
	pub fn secondary_store(mut self, store: SharedStore) -> Self {
		self.secondary = Some(store);
		self
	}

	/// Builds the client.
	///
	/// Fails with [`AnalyticsError::InvalidBaseUrl`] when the base URL
	/// is missing, still the config-template placeholder, or not an
	/// absolute URL. A relative analytics endpoint has no meaning
	/// outside a browser, so this is caught at construction rather
	/// than on every request.
	pub fn build(self) -> Result<AnalyticsClient> {
		let base_url = self.base_url.unwrap_or_default();
		if base_url.is_empty() || base_url == BASE_URL_PLACEHOLDER {
			return Err(AnalyticsError::InvalidBaseUrl(
				"base URL is unset or a placeholder".to_string(),
			));
		}
		Url::parse(&base_url).map_err(|e| AnalyticsError::InvalidBaseUrl(e.to_string()))?;

		let base_url = base_url.trim_end_matches('/').to_string();
		let http = self.http.unwrap_or_else(cassette_common_http::new_client);

		let identity = match &self.durable {
			Some(primary) => {
				let secondary = self
					.secondary
					.unwrap_or_else(|| Arc::new(MemoryStore::new()) as SharedStore);
				IdentityManager::new(Arc::clone(primary), secondary)
			}
			None => IdentityManager::disabled(),
		};

		info!(base_url = %base_url, "analytics client initialized");

		Ok(AnalyticsClient {
			base_url,
			http,
			durable: self.durable,
			identity,
		})
	}
}

impl Default for AnalyticsClientBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// Client for recording Cassette analytics events.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
///
/// use cassette_analytics::{AnalyticsClient, EventProps, FileStore, SharedStore};
///
/// let durable: SharedStore = Arc::new(FileStore::new("/var/lib/cassette/state.json"));
/// let client = AnalyticsClient::builder()
///     .base_url("https://cassette.example.com")
///     .durable_store(durable)
///     .build()?;
///
/// let response = client
///     .record_post_view("post_123", EventProps::new()
///         .insert("route", "/post/123")
///         .insert("source_platform", "spotify"))
///     .await?;
/// ```
pub struct AnalyticsClient {
	base_url: String,
	http: Client,
	durable: Option<SharedStore>,
	identity: IdentityManager,
}

impl AnalyticsClient {
	/// Creates a new builder.
	pub fn builder() -> AnalyticsClientBuilder {
		AnalyticsClientBuilder::new()
	}

	/// Records a view of the post `post_id`.
	pub async fn record_post_view(
		&self,
		post_id: &str,
		props: EventProps,
	) -> Result<RecordResponse> {
		self.record("post-view", props.insert("post_id", post_id)).await
	}

	/// Records a view of the profile belonging to `profile_user_id`.
	pub async fn record_profile_view(
		&self,
		profile_user_id: &str,
		props: EventProps,
	) -> Result<RecordResponse> {
		self
			.record("profile-view", props.insert("user_id", profile_user_id))
			.await
	}

	/// Records a click on an outbound link of the post `post_id`.
	pub async fn record_post_click(
		&self,
		post_id: &str,
		props: EventProps,
	) -> Result<RecordResponse> {
		self.record("post-click", props.insert("post_id", post_id)).await
	}

	/// Fetches the aggregated counters for `profile_user_id`.
	pub async fn profile_summary(&self, profile_user_id: &str) -> Result<ProfileAnalyticsSummary> {
		let url = self.url("profile-summary");
		let props = EventProps::new().insert("user_id", profile_user_id);
		let body = sanitize(&props).into_value();

		debug!(url = %url, "fetching profile analytics summary");

		let response = self.request(&url, &body).await?;
		Ok(response.json().await?)
	}

	async fn record(&self, kind: &str, props: EventProps) -> Result<RecordResponse> {
		let url = self.url(kind);
		let body = sanitize(&props).into_value();

		debug!(url = %url, "recording analytics event");

		let response = self.request(&url, &body).await?;
		Ok(response.json().await?)
	}

	fn url(&self, endpoint: &str) -> String {
		endpoint_url(
			Some(self.base_url.as_str()),
			&format!("{ANALYTICS_PREFIX}/{endpoint}"),
		)
	}

	/// Sends one POST. One attempt is final.
	async fn request(&self, url: &str, body: &serde_json::Value) -> Result<reqwest::Response> {
		let mut request = self
			.http
			.post(url)
			.header("X-Cassette-Lib", LIB_NAME)
			.header("X-Cassette-Lib-Version", LIB_VERSION)
			.json(body);

		if let Some(token) = self.session_token().await {
			request = request.header("Authorization", format!("Bearer {}", token.expose()));
		}

		if let Some(id) = self.identity.get_or_create().await {
			request = request.header("X-Anonymous-Id", id.as_str());
		}

		let response = request.send().await?;

		if !response.status().is_success() {
			return Err(AnalyticsError::Status {
				status: response.status().as_u16(),
			});
		}

		Ok(response)
	}

	async fn session_token(&self) -> Option<SecretString> {
		let durable = self.durable.as_ref()?;
		match durable.get(SESSION_TOKEN_KEY).await {
			Ok(Some(token)) if !token.trim().is_empty() => Some(SecretString::new(token)),
			Ok(_) => None,
			Err(e) => {
				warn!(error = %e, "failed to read session token");
				None
			}
		}
	}
}
