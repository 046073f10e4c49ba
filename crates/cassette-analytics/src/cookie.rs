// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Cookie formatting for the anonymous id.
//!
//! Web frontends embedding the SDK mirror the anonymous id into a
//! long-lived cookie so it survives cleared local state. These helpers
//! produce and parse the header values; actually sending them is the
//! embedding application's job.

use cassette_analytics_core::AnonymousId;

/// Name of the cookie carrying the anonymous id.
pub const ANONYMOUS_ID_COOKIE: &str = "cassette_anon_id";

/// Cookie lifetime: two years, in seconds.
pub const ANONYMOUS_ID_COOKIE_MAX_AGE_SECS: u64 = 2 * 365 * 24 * 60 * 60;

/// Renders a `Set-Cookie` header value persisting `id`.
pub fn anonymous_id_set_cookie(id: &AnonymousId) -> String {
	format!(
		"{}={}; Max-Age={}; Path=/; SameSite=Lax",
		ANONYMOUS_ID_COOKIE,
		urlencoding::encode(id.as_str()),
		ANONYMOUS_ID_COOKIE_MAX_AGE_SECS
	)
}

/// Extracts the anonymous id from a `Cookie` request header, if present.
///
/// Blank or undecodable values are treated as absent.
pub fn anonymous_id_from_cookie_header(header: &str) -> Option<AnonymousId> {
	header
		.split(';')
		.filter_map(|part| part.trim().split_once('='))
		.find(|(name, _)| *name == ANONYMOUS_ID_COOKIE)
		.and_then(|(_, value)| urlencoding::decode(value).ok())
		.and_then(|value| AnonymousId::parse(value).ok())
}
