// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Handler-level authorization helpers.
//!
//! Handlers resolve the caller's membership with [`get_user_membership`],
//! which also builds a fresh [`Ability`] for the caller's current role, then
//! gate every mutation with [`authorize!`](crate::authorize).
//!
//! Denials are always `403 Forbidden` and never leak which rule decided.

use saas_auth::{get_user_permissions, Ability, Subject, SubjectAction, SubjectModel, UserId};
use tracing::instrument;

use crate::api::AppState;
use crate::error::ServerError;
use crate::store::{MemberRecord, OrganizationRecord};

/// The caller's standing in one organization.
#[derive(Debug, Clone)]
pub struct Membership {
	pub organization: OrganizationRecord,
	pub member: MemberRecord,
	pub ability: Ability,
}

/// Resolves the organization by slug and the caller's membership in it.
///
/// Returns `404` for an unknown organization and `403` when the caller is
/// not a member.
#[instrument(skip(state), fields(user_id = %user_id))]
pub async fn get_user_membership(
	state: &AppState,
	slug: &str,
	user_id: &UserId,
) -> Result<Membership, ServerError> {
	let organization = state
		.store
		.organization_by_slug(slug)
		.await
		.ok_or_else(|| ServerError::NotFound("Organization not found.".to_string()))?;

	let member = state
		.store
		.member(&organization.id, user_id)
		.await
		.ok_or_else(|| {
			tracing::info!(org_id = %organization.id, "caller is not a member of the organization");
			ServerError::Forbidden("You're not a member of this organization.".to_string())
		})?;

	let ability = get_user_permissions(user_id.clone(), member.role);

	Ok(Membership {
		organization,
		member,
		ability,
	})
}

/// Checks one `(action, subject)` pair against an ability.
///
/// A schema or detection failure propagates as its own error; a denial
/// becomes `403 Forbidden`.
#[instrument(
	level = "debug",
	skip_all,
	fields(
		actor_id = %ability.user().id,
		role = %ability.user().role,
		action = ?action,
		subject_kind = %<A::Subject as SubjectModel>::KIND,
	)
)]
pub fn check_authorization<A: SubjectAction>(
	ability: &Ability,
	action: A,
	subject: Subject<'_, A::Subject>,
) -> Result<(), ServerError> {
	if ability.can(action, subject)? {
		tracing::debug!("Authorization check passed");
		Ok(())
	} else {
		let subject_kind = <A::Subject as SubjectModel>::KIND;
		tracing::info!(
			actor_id = %ability.user().id,
			action = ?action,
			subject_kind = %subject_kind,
			"ability denied: insufficient permissions"
		);
		Err(ServerError::Forbidden("Insufficient permissions.".to_string()))
	}
}

/// Inline authorization check for handlers.
///
/// ```ignore
/// let membership = get_user_membership(&state, &slug, &user.id).await?;
/// authorize!(&membership.ability, ProjectAction::Create, Subject::Type)?;
/// ```
#[macro_export]
macro_rules! authorize {
	($ability:expr, $action:expr, $subject:expr) => {
		$crate::authz::check_authorization($ability, $action, $subject)
	};
}
