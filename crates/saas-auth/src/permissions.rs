// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Role table and the ability facade.
//!
//! Each [`Role`] maps to a function that registers that role's rules on a
//! [`RuleBuilder`]. The mapping is an exhaustive match, so adding a role
//! without rules does not compile. The only way to reach an unknown role is
//! to decode one from untrusted input, see [`define_ability_for_claims`].

use tracing::{error, instrument};

use crate::ability::{Ability, Condition, RuleBuilder};
use crate::detect::TypenameDetector;
use crate::error::AbilityError;
use crate::subjects::{AllAction, BillingAction, ProjectAction, User, UserAction};
use crate::types::{Role, UserId};

/// Registers the rules granted to one role.
pub type RoleRules = fn(&User, &mut RuleBuilder);

/// Returns the rule function for a role.
pub fn permissions_for(role: Role) -> RoleRules {
	match role {
		Role::Admin => admin,
		Role::Member => member,
		Role::Billing => billing,
	}
}

fn admin(_user: &User, builder: &mut RuleBuilder) {
	builder.allow(AllAction::Manage);
}

// The blanket delete deny sits between the grants and the ownership allow,
// so owners still get through.
fn member(_user: &User, builder: &mut RuleBuilder) {
	builder
		.allow(UserAction::Get)
		.allow(ProjectAction::Get)
		.allow(ProjectAction::Create)
		.deny(ProjectAction::Delete)
		.allow_when(ProjectAction::Update, Condition::owned_by_user())
		.allow_when(ProjectAction::Delete, Condition::owned_by_user());
}

fn billing(_user: &User, builder: &mut RuleBuilder) {
	builder.allow(BillingAction::Get);
}

/// Builds the ability for a user from the role table.
///
/// A fresh ability is built on every call; nothing is cached, so role and
/// ownership changes are visible immediately.
#[instrument(level = "debug", skip(user), fields(user_id = %user.id, role = %user.role))]
pub fn define_ability_for(user: &User) -> Ability {
	let mut builder = RuleBuilder::new(user.clone());
	permissions_for(user.role)(user, &mut builder);
	builder.build(TypenameDetector)
}

/// Builds an ability from an untyped `(user id, role name)` claim.
///
/// # Errors
///
/// Returns [`AbilityError::RoleNotFound`] if `role` is not in the role table.
pub fn define_ability_for_claims(user_id: &str, role: &str) -> Result<Ability, AbilityError> {
	let role: Role = role.parse().map_err(|e| {
		error!(user_id = %user_id, role = %role, "permissions for role not found");
		e
	})?;
	Ok(define_ability_for(&User::new(user_id, role)))
}

/// Convenience wrapper used by request handlers once membership is resolved.
pub fn get_user_permissions(user_id: impl Into<UserId>, role: Role) -> Ability {
	define_ability_for(&User::new(user_id, role))
}
