// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Account registration and profile handlers.
//!
//! Credentials are handled by the upstream gateway; registration here only
//! records the profile the gateway's user id maps to.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use saas_auth::{Role, UserId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::api::AppState;
use crate::auth_middleware::RequireAuth;
use crate::error::ServerError;
use crate::store::UserRecord;
use crate::validation::{email_domain, sanitize_email, validate_email, validate_name};

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
	pub name: String,
	pub email: String,
	#[serde(default)]
	pub avatar_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateAccountResponse {
	pub user_id: UserId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
	pub user: UserRecord,
}

/// POST /users - Register an account.
///
/// If an organization auto-attaches users on the email's domain, the new
/// user joins it as a `MEMBER`.
#[instrument(skip(state, req))]
pub async fn create_account(
	State(state): State<AppState>,
	Json(req): Json<CreateAccountRequest>,
) -> Result<impl IntoResponse, ServerError> {
	validate_name("name", &req.name, 100)?;
	let email = sanitize_email(&req.email);
	validate_email(&email)?;

	let user = state
		.store
		.insert_user(UserRecord {
			id: UserId::generate(),
			name: Some(req.name.trim().to_string()),
			email: email.clone(),
			avatar_url: req.avatar_url,
		})
		.await
		.map_err(|_| ServerError::Conflict("User with same e-mail already exists.".to_string()))?;

	if let Some(domain) = email_domain(&email) {
		if let Some(org) = state.store.organization_attached_to_domain(&domain).await {
			state
				.store
				.add_member(&org.id, &user.id, Role::Member)
				.await?;
			tracing::info!(user_id = %user.id, org_id = %org.id, "user auto-attached by domain");
		}
	}

	tracing::info!(user_id = %user.id, "account created");
	Ok((
		StatusCode::CREATED,
		Json(CreateAccountResponse { user_id: user.id }),
	))
}

/// GET /profile - The authenticated caller's profile.
#[instrument(skip(state, current_user), fields(actor_id = %current_user.id))]
pub async fn get_profile(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, ServerError> {
	let user = state
		.store
		.user(&current_user.id)
		.await
		.ok_or_else(|| ServerError::NotFound("User not found.".to_string()))?;
	Ok(Json(ProfileResponse { user }))
}
