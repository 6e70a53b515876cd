// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Invite HTTP handlers.

use axum::{
	extract::{Path, State},
	http::StatusCode,
	response::IntoResponse,
	Json,
};
use saas_auth::{InviteAction, InviteId, OrgId, Role, Subject};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::api::AppState;
use crate::auth_middleware::RequireAuth;
use crate::authorize;
use crate::authz::get_user_membership;
use crate::error::ServerError;
use crate::store::{InviteRecord, NewInvite};
use crate::validation::{email_domain, sanitize_email, validate_email};

#[derive(Debug, Deserialize)]
pub struct CreateInviteRequest {
	pub email: String,
	pub role: Role,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateInviteResponse {
	pub invite_id: InviteId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InviteResponse {
	pub invite: InviteRecord,
	pub organization_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AcceptInviteResponse {
	pub organization_id: OrgId,
	pub role: Role,
}

/// POST /organizations/{slug}/invites - Invite an email address.
#[instrument(skip(state, current_user, req), fields(actor_id = %current_user.id))]
pub async fn create_invite(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(slug): Path<String>,
	Json(req): Json<CreateInviteRequest>,
) -> Result<impl IntoResponse, ServerError> {
	let membership = get_user_membership(&state, &slug, &current_user.id).await?;
	authorize!(&membership.ability, InviteAction::Create, Subject::Type)?;

	let email = sanitize_email(&req.email);
	validate_email(&email)?;

	let org = &membership.organization;
	let domain = email_domain(&email);
	if org.should_attach_users_by_domain && org.domain.is_some() && org.domain == domain {
		return Err(ServerError::BadRequest(format!(
			"Users with the \"{}\" domain will join your organization automatically on login.",
			domain.unwrap_or_default()
		)));
	}

	if state.store.invite_with_email(&org.id, &email).await.is_some() {
		return Err(ServerError::Conflict(
			"An invite for this email already exists.".to_string(),
		));
	}

	if state.store.member_with_email(&org.id, &email).await.is_some() {
		return Err(ServerError::Conflict(
			"A member with this email already exists in the organization.".to_string(),
		));
	}

	let invite = state
		.store
		.create_invite(NewInvite {
			email,
			role: req.role,
			author_id: current_user.id.clone(),
			organization_id: org.id.clone(),
		})
		.await?;

	tracing::info!(invite_id = %invite.id, org_id = %org.id, role = %invite.role, "invite created");
	Ok((
		StatusCode::CREATED,
		Json(CreateInviteResponse {
			invite_id: invite.id,
		}),
	))
}

/// GET /invites/{invite_id} - Invite details, shown before signing in.
#[instrument(skip(state))]
pub async fn get_invite(
	State(state): State<AppState>,
	Path(invite_id): Path<String>,
) -> Result<Json<InviteResponse>, ServerError> {
	let invite = state
		.store
		.invite(&InviteId::new(invite_id))
		.await
		.ok_or_else(|| ServerError::NotFound("Invite not found.".to_string()))?;
	let organization = state
		.store
		.organization(&invite.organization_id)
		.await
		.ok_or_else(|| ServerError::NotFound("Invite not found.".to_string()))?;

	Ok(Json(InviteResponse {
		invite,
		organization_name: organization.name,
	}))
}

/// POST /invites/{invite_id}/accept - Join the inviting organization.
///
/// The caller's email must match the invite; they join with its role.
#[instrument(skip(state, current_user), fields(actor_id = %current_user.id))]
pub async fn accept_invite(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(invite_id): Path<String>,
) -> Result<Json<AcceptInviteResponse>, ServerError> {
	let invite = state
		.store
		.invite(&InviteId::new(invite_id))
		.await
		.ok_or_else(|| ServerError::NotFound("Invite not found or expired.".to_string()))?;

	let user = state
		.store
		.user(&current_user.id)
		.await
		.ok_or_else(|| ServerError::NotFound("User not found.".to_string()))?;

	if !user.email.eq_ignore_ascii_case(&invite.email) {
		tracing::info!(invite_id = %invite.id, "invite belongs to another user");
		return Err(ServerError::Forbidden(
			"This invite belongs to another user.".to_string(),
		));
	}

	let member = state.store.accept_invite(&invite.id, &user.id).await?;

	tracing::info!(invite_id = %invite.id, org_id = %member.organization_id, "invite accepted");
	Ok(Json(AcceptInviteResponse {
		organization_id: member.organization_id,
		role: member.role,
	}))
}

/// DELETE /organizations/{slug}/invites/{invite_id} - Revoke an invite.
#[instrument(skip(state, current_user), fields(actor_id = %current_user.id))]
pub async fn revoke_invite(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path((slug, invite_id)): Path<(String, String)>,
) -> Result<StatusCode, ServerError> {
	let membership = get_user_membership(&state, &slug, &current_user.id).await?;
	let invite = state
		.store
		.invite(&InviteId::new(invite_id))
		.await
		.filter(|i| i.organization_id == membership.organization.id)
		.ok_or_else(|| ServerError::NotFound("Invite not found.".to_string()))?;

	authorize!(
		&membership.ability,
		InviteAction::Delete,
		(&invite.subject()).into()
	)?;

	state.store.delete_invite(&invite.id).await?;
	Ok(StatusCode::NO_CONTENT)
}
