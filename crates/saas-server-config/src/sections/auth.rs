// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authentication configuration.
//!
//! Credentials are verified upstream of the API server. The server only reads
//! the verified user id from a request header, and only when told to trust it.
//!
//! With `trust_identity_header` off no request can authenticate, so every
//! gated route answers `401`. A production deployment serves authenticated
//! traffic by setting `gateway_secret`: the gateway then proves itself with
//! `Authorization: Bearer <gateway_secret>` on every request, and only then is
//! the identity header read.

use std::fmt;

use serde::Deserialize;

/// Authentication configuration (runtime, fully resolved).
#[derive(Clone)]
pub struct AuthConfig {
	pub environment: String,
	pub trust_identity_header: bool,
	pub identity_header: String,
	/// Shared secret the upstream gateway presents as a bearer token.
	pub gateway_secret: Option<String>,
}

impl fmt::Debug for AuthConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AuthConfig")
			.field("environment", &self.environment)
			.field("trust_identity_header", &self.trust_identity_header)
			.field("identity_header", &self.identity_header)
			.field(
				"gateway_secret",
				&self.gateway_secret.as_ref().map(|_| "[REDACTED]"),
			)
			.finish()
	}
}

impl AuthConfig {
	pub fn is_production(&self) -> bool {
		self.environment == "production"
	}
}

impl Default for AuthConfig {
	fn default() -> Self {
		AuthConfigLayer::default().finalize()
	}
}

/// Authentication configuration layer (partial, for merging).
#[derive(Clone, Default, Deserialize)]
pub struct AuthConfigLayer {
	#[serde(default)]
	pub environment: Option<String>,
	#[serde(default)]
	pub trust_identity_header: Option<bool>,
	#[serde(default)]
	pub identity_header: Option<String>,
	#[serde(default)]
	pub gateway_secret: Option<String>,
}

impl fmt::Debug for AuthConfigLayer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AuthConfigLayer")
			.field("environment", &self.environment)
			.field("trust_identity_header", &self.trust_identity_header)
			.field("identity_header", &self.identity_header)
			.field(
				"gateway_secret",
				&self.gateway_secret.as_ref().map(|_| "[REDACTED]"),
			)
			.finish()
	}
}

impl AuthConfigLayer {
	pub fn merge(&mut self, other: AuthConfigLayer) {
		if other.environment.is_some() {
			self.environment = other.environment;
		}
		if other.trust_identity_header.is_some() {
			self.trust_identity_header = other.trust_identity_header;
		}
		if other.identity_header.is_some() {
			self.identity_header = other.identity_header;
		}
		if other.gateway_secret.is_some() {
			self.gateway_secret = other.gateway_secret;
		}
	}

	pub fn finalize(self) -> AuthConfig {
		AuthConfig {
			environment: self
				.environment
				.unwrap_or_else(|| "development".to_string()),
			trust_identity_header: self.trust_identity_header.unwrap_or(true),
			identity_header: self
				.identity_header
				.map(|h| h.to_ascii_lowercase())
				.unwrap_or_else(|| "x-user-id".to_string()),
			gateway_secret: self.gateway_secret.filter(|s| !s.is_empty()),
		}
	}
}
