// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request identity extraction.
//!
//! Authentication happens upstream. The gateway in front of this server
//! forwards the authenticated user id in a configured header, and the
//! [`RequireAuth`] extractor turns that header into a [`CurrentUser`].
//!
//! When `auth.trust_identity_header` is off every request is rejected with
//! `401 Unauthorized`; there is no other way to authenticate. When
//! `auth.gateway_secret` is set the gateway must also present it as
//! `Authorization: Bearer <secret>`, otherwise the identity header is ignored.

use axum::{
	extract::FromRequestParts,
	http::{header::AUTHORIZATION, request::Parts},
};
use saas_auth::UserId;
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::api::AppState;
use crate::error::ServerError;

/// The authenticated caller of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
	pub id: UserId,
}

/// Extractor that requires an authenticated caller.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub CurrentUser);

impl FromRequestParts<AppState> for RequireAuth {
	type Rejection = ServerError;

	async fn from_request_parts(
		parts: &mut Parts,
		state: &AppState,
	) -> Result<Self, Self::Rejection> {
		if !state.auth.trust_identity_header {
			tracing::debug!("identity header not trusted, rejecting request");
			return Err(ServerError::Unauthorized("Authentication required.".to_string()));
		}

		if let Some(secret) = &state.auth.gateway_secret {
			verify_gateway(parts, secret)?;
		}

		let user_id = parts
			.headers
			.get(state.auth.identity_header.as_str())
			.and_then(|value| value.to_str().ok())
			.map(str::trim)
			.filter(|value| !value.is_empty())
			.ok_or_else(|| {
				tracing::debug!(header = %state.auth.identity_header, "missing identity header");
				ServerError::Unauthorized("Authentication required.".to_string())
			})?;

		Ok(RequireAuth(CurrentUser {
			id: UserId::new(user_id),
		}))
	}
}

/// Checks the bearer token the gateway forwards against the shared secret.
fn verify_gateway(parts: &Parts, secret: &str) -> Result<(), ServerError> {
	let unauthorized = || ServerError::Unauthorized("Authentication required.".to_string());

	let Some(auth_value) = parts
		.headers
		.get(AUTHORIZATION)
		.and_then(|value| value.to_str().ok())
	else {
		warn!("gateway auth failed: missing Authorization header");
		return Err(unauthorized());
	};

	let Some(token) = auth_value.strip_prefix("Bearer ").map(str::trim) else {
		warn!("gateway auth failed: invalid Authorization format");
		return Err(unauthorized());
	};

	let expected = secret.as_bytes();
	let presented = token.as_bytes();
	if expected.len() != presented.len() || !bool::from(expected.ct_eq(presented)) {
		warn!("gateway auth failed: invalid token");
		return Err(unauthorized());
	}

	Ok(())
}
