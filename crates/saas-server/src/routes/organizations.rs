// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Organization HTTP handlers.
//!
//! Every handler except [`create_organization`] resolves the caller's
//! membership first, so an unknown slug is `404` and a non-member is `403`
//! before any ability check runs.

use axum::{
	extract::{Path, State},
	http::StatusCode,
	response::IntoResponse,
	Json,
};
use saas_auth::{
	BillingAction, InviteAction, OrgId, OrganizationAction, ProjectAction, Role, Subject, UserId,
};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::instrument;

use crate::api::AppState;
use crate::auth_middleware::RequireAuth;
use crate::authorize;
use crate::authz::get_user_membership;
use crate::error::ServerError;
use crate::store::{NewOrganization, OrganizationUpdate};
use crate::validation::{create_slug, validate_name, validate_slug};

#[derive(Debug, Deserialize)]
pub struct CreateOrganizationRequest {
	pub name: String,
	#[serde(default)]
	pub domain: Option<String>,
	#[serde(default)]
	pub should_attach_users_by_domain: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateOrganizationResponse {
	pub organization_id: OrgId,
	pub slug: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrganizationRequest {
	pub name: String,
	/// Absent leaves the domain unchanged; `null` or `""` clears it.
	#[serde(default, deserialize_with = "present")]
	pub domain: Option<Option<String>>,
	#[serde(default)]
	pub should_attach_users_by_domain: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct TransferOwnershipRequest {
	pub transfer_to_user_id: UserId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MembershipResponse {
	pub organization_id: OrgId,
	pub user_id: UserId,
	pub role: Role,
}

/// Capability flags the settings page and header render from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionsResponse {
	pub can_update_organization: bool,
	pub can_delete_organization: bool,
	pub can_transfer_ownership: bool,
	pub can_get_billing: bool,
	pub can_get_projects: bool,
	pub can_create_project: bool,
	pub can_create_invite: bool,
}

/// Wraps a field that is present in the body, `null` included, in `Some`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
	D: Deserializer<'de>,
	T: Deserialize<'de>,
{
	T::deserialize(deserializer).map(Some)
}

fn normalize_domain(domain: Option<String>) -> Option<String> {
	domain
		.map(|d| d.trim().to_ascii_lowercase())
		.filter(|d| !d.is_empty())
}

/// POST /organizations - Create an organization owned by the caller.
#[instrument(skip(state, current_user, req), fields(actor_id = %current_user.id))]
pub async fn create_organization(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Json(req): Json<CreateOrganizationRequest>,
) -> Result<impl IntoResponse, ServerError> {
	validate_name("name", &req.name, 100)?;
	let slug = create_slug(&req.name);
	if !validate_slug(&slug, 1, 100) {
		return Err(ServerError::BadRequest(
			"Organization name must contain letters or digits.".to_string(),
		));
	}

	let org = state
		.store
		.create_organization(NewOrganization {
			name: req.name.trim().to_string(),
			slug,
			domain: normalize_domain(req.domain),
			should_attach_users_by_domain: req.should_attach_users_by_domain,
			owner_id: current_user.id.clone(),
		})
		.await?;

	tracing::info!(org_id = %org.id, slug = %org.slug, "organization created");
	Ok((
		StatusCode::CREATED,
		Json(CreateOrganizationResponse {
			organization_id: org.id,
			slug: org.slug,
		}),
	))
}

/// GET /organizations/{slug}/membership - The caller's role.
#[instrument(skip(state, current_user), fields(actor_id = %current_user.id))]
pub async fn get_membership(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(slug): Path<String>,
) -> Result<Json<MembershipResponse>, ServerError> {
	let membership = get_user_membership(&state, &slug, &current_user.id).await?;
	Ok(Json(MembershipResponse {
		organization_id: membership.member.organization_id,
		user_id: membership.member.user_id,
		role: membership.member.role,
	}))
}

/// GET /organizations/{slug}/permissions - UI capability flags.
#[instrument(skip(state, current_user), fields(actor_id = %current_user.id))]
pub async fn get_permissions(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(slug): Path<String>,
) -> Result<Json<PermissionsResponse>, ServerError> {
	let membership = get_user_membership(&state, &slug, &current_user.id).await?;
	let ability = &membership.ability;
	let org = membership.organization.subject();

	Ok(Json(PermissionsResponse {
		can_update_organization: ability.can(OrganizationAction::Update, (&org).into())?,
		can_delete_organization: ability.can(OrganizationAction::Delete, (&org).into())?,
		can_transfer_ownership: ability
			.can(OrganizationAction::TransferOwnership, (&org).into())?,
		can_get_billing: ability.can(BillingAction::Get, Subject::Type)?,
		can_get_projects: ability.can(ProjectAction::Get, Subject::Type)?,
		can_create_project: ability.can(ProjectAction::Create, Subject::Type)?,
		can_create_invite: ability.can(InviteAction::Create, Subject::Type)?,
	}))
}

/// PUT /organizations/{slug} - Update name, domain and auto-attach.
#[instrument(skip(state, current_user, req), fields(actor_id = %current_user.id))]
pub async fn update_organization(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(slug): Path<String>,
	Json(req): Json<UpdateOrganizationRequest>,
) -> Result<StatusCode, ServerError> {
	let membership = get_user_membership(&state, &slug, &current_user.id).await?;
	let org = membership.organization.subject();
	authorize!(&membership.ability, OrganizationAction::Update, (&org).into())?;

	validate_name("name", &req.name, 100)?;
	state
		.store
		.update_organization(
			&membership.organization.id,
			OrganizationUpdate {
				name: Some(req.name.trim().to_string()),
				domain: req.domain.map(normalize_domain),
				should_attach_users_by_domain: req.should_attach_users_by_domain,
			},
		)
		.await?;

	Ok(StatusCode::NO_CONTENT)
}

/// PATCH /organizations/{slug}/owner - Hand the organization to another member.
#[instrument(skip(state, current_user, req), fields(actor_id = %current_user.id))]
pub async fn transfer_ownership(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(slug): Path<String>,
	Json(req): Json<TransferOwnershipRequest>,
) -> Result<StatusCode, ServerError> {
	let membership = get_user_membership(&state, &slug, &current_user.id).await?;
	let org = membership.organization.subject();
	authorize!(
		&membership.ability,
		OrganizationAction::TransferOwnership,
		(&org).into()
	)?;

	let org_id = &membership.organization.id;
	if state
		.store
		.member(org_id, &req.transfer_to_user_id)
		.await
		.is_none()
	{
		return Err(ServerError::BadRequest(
			"Target user is not a member of this organization.".to_string(),
		));
	}

	state
		.store
		.transfer_organization(org_id, &req.transfer_to_user_id)
		.await?;

	tracing::info!(org_id = %org_id, new_owner = %req.transfer_to_user_id, "ownership transferred");
	Ok(StatusCode::NO_CONTENT)
}

/// DELETE /organizations/{slug} - Shut the organization down.
#[instrument(skip(state, current_user), fields(actor_id = %current_user.id))]
pub async fn delete_organization(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(slug): Path<String>,
) -> Result<StatusCode, ServerError> {
	let membership = get_user_membership(&state, &slug, &current_user.id).await?;
	let org = membership.organization.subject();
	authorize!(&membership.ability, OrganizationAction::Delete, (&org).into())?;

	state
		.store
		.delete_organization(&membership.organization.id)
		.await?;

	tracing::info!(org_id = %membership.organization.id, "organization deleted");
	Ok(StatusCode::NO_CONTENT)
}
