// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for Cassette's client analytics pipeline.
//!
//! This crate holds the pure half of the pipeline: no I/O, no async, no
//! storage. It is shared between the SDK (`cassette-analytics`) and any
//! server-side consumer that needs to agree on the wire shapes.
//!
//! # Overview
//!
//! - [`MusicPlatform`]: the closed set of platforms Cassette links to,
//!   with alias normalization between wire names and analytics short names
//! - [`EventProps`]: builder for per-event metadata
//! - [`sanitize`]: the allow-list filter every property set passes
//!   through before transmission
//! - [`PendingAction`]: a playlist-creation intent persisted across an
//!   authentication redirect, with lazy TTL expiry
//! - [`AnonymousId`]: the stable per-installation identifier
//!
//! # Example
//!
//! ```
//! use cassette_analytics_core::{sanitize, EventProps};
//!
//! let props = EventProps::new()
//!     .insert("route", "/post/123?token=abc")
//!     .insert("source_platform", "appleMusic")
//!     .insert("description", "never forwarded");
//!
//! let clean = sanitize(&props);
//! assert_eq!(clean.get("route").unwrap(), "/post/123");
//! assert_eq!(clean.get("source_platform").unwrap(), "apple");
//! assert!(clean.get("description").is_none());
//! ```

pub mod anonymous;
pub mod error;
pub mod pending;
pub mod platform;
pub mod props;
pub mod sanitize;

pub use anonymous::AnonymousId;
pub use error::CoreError;
pub use pending::{PendingAction, PENDING_ACTION_TTL_MS};
pub use platform::MusicPlatform;
pub use props::EventProps;
pub use sanitize::{is_allowed_field, is_forbidden_field, sanitize};
