// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Server error type and its HTTP mapping.
//!
//! Every handler returns `Result<_, ServerError>`. A denied ability check is
//! always `403 Forbidden`, kept distinct from `404 Not Found` and
//! `400 Bad Request`.

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use saas_auth::AbilityError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::StoreError;

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
}

#[derive(Debug, Error)]
pub enum ServerError {
	#[error("unauthorized: {0}")]
	Unauthorized(String),

	#[error("forbidden: {0}")]
	Forbidden(String),

	#[error("not found: {0}")]
	NotFound(String),

	#[error("bad request: {0}")]
	BadRequest(String),

	#[error("conflict: {0}")]
	Conflict(String),

	#[error(transparent)]
	Ability(#[from] AbilityError),
}

impl ServerError {
	pub fn status_code(&self) -> StatusCode {
		match self {
			ServerError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
			ServerError::Forbidden(_) => StatusCode::FORBIDDEN,
			ServerError::NotFound(_) => StatusCode::NOT_FOUND,
			ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
			ServerError::Conflict(_) => StatusCode::CONFLICT,
			ServerError::Ability(e) => {
				StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
			}
		}
	}

	/// Machine-readable error code.
	pub fn code(&self) -> &'static str {
		match self {
			ServerError::Unauthorized(_) => "unauthorized",
			ServerError::Forbidden(_) => "forbidden",
			ServerError::NotFound(_) => "not_found",
			ServerError::BadRequest(_) => "bad_request",
			ServerError::Conflict(_) => "conflict",
			ServerError::Ability(e) if !e.is_internal() => "invalid_subject",
			ServerError::Ability(_) => "internal_error",
		}
	}

	fn is_internal(&self) -> bool {
		matches!(self, ServerError::Ability(e) if e.is_internal())
	}
}

impl From<StoreError> for ServerError {
	fn from(e: StoreError) -> Self {
		match e {
			StoreError::Duplicate(message) => ServerError::Conflict(message),
			StoreError::NotFound(message) => ServerError::NotFound(message),
		}
	}
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		let status = self.status_code();
		let message = if self.is_internal() {
			tracing::error!(error = %self, "request failed with internal error");
			"An internal error occurred".to_string()
		} else {
			match &self {
				ServerError::Unauthorized(m)
				| ServerError::Forbidden(m)
				| ServerError::NotFound(m)
				| ServerError::BadRequest(m)
				| ServerError::Conflict(m) => m.clone(),
				other => other.to_string(),
			}
		};

		(
			status,
			Json(ErrorResponse {
				error: self.code().to_string(),
				message,
			}),
		)
			.into_response()
	}
}
