// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core identifier and role types.
//!
//! - **ID newtypes**: Opaque string identifiers for users, projects,
//!   organizations and invites ([`UserId`], [`ProjectId`], [`OrgId`], [`InviteId`]).
//!   Keeping them distinct prevents accidentally comparing a project id with a
//!   user id inside an ownership condition.
//! - **Role**: The closed set of membership roles ([`Role`]) that the role
//!   table in [`crate::permissions`] is keyed by.
//!
//! All ID types serialize transparently as strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::AbilityError;

// =============================================================================
// ID Newtypes
// =============================================================================

macro_rules! define_id_type {
	($name:ident, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(String);

		impl $name {
			/// Create a new ID from any string-like value.
			pub fn new(id: impl Into<String>) -> Self {
				Self(id.into())
			}

			/// Generate a new random ID (UUID v4).
			pub fn generate() -> Self {
				Self(Uuid::new_v4().to_string())
			}

			/// Get the inner string value.
			pub fn into_inner(self) -> String {
				self.0
			}

			/// Borrow the ID as a string slice.
			pub fn as_str(&self) -> &str {
				&self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str(&self.0)
			}
		}

		impl From<String> for $name {
			fn from(id: String) -> Self {
				Self(id)
			}
		}

		impl From<&str> for $name {
			fn from(id: &str) -> Self {
				Self(id.to_string())
			}
		}

		impl From<Uuid> for $name {
			fn from(id: Uuid) -> Self {
				Self(id.to_string())
			}
		}
	};
}

define_id_type!(UserId, "Unique identifier for a user.");
define_id_type!(ProjectId, "Unique identifier for a project.");
define_id_type!(OrgId, "Unique identifier for an organization.");
define_id_type!(InviteId, "Unique identifier for an invite.");

// =============================================================================
// Roles
// =============================================================================

/// Membership role within an organization.
///
/// The set is closed: every variant has a rule function in
/// [`crate::permissions::permissions_for`], which the compiler checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
	/// Full administrative rights over the organization.
	Admin,
	/// Regular member: reads and creates projects, manages the ones they own.
	Member,
	/// Read access to billing information only.
	#[serde(alias = "BILLING_MANAGER")]
	Billing,
}

impl Role {
	/// Returns all available roles.
	pub fn all() -> &'static [Role] {
		&[Role::Admin, Role::Member, Role::Billing]
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Role::Admin => "ADMIN",
			Role::Member => "MEMBER",
			Role::Billing => "BILLING",
		}
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Role {
	type Err = AbilityError;

	/// Decodes a role from an untrusted source such as a token claim or a
	/// database column. Unknown values are a configuration defect.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"ADMIN" => Ok(Role::Admin),
			"MEMBER" => Ok(Role::Member),
			"BILLING" | "BILLING_MANAGER" => Ok(Role::Billing),
			other => Err(AbilityError::RoleNotFound(other.to_string())),
		}
	}
}
