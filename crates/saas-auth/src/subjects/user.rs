// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User subject.

use serde::{Deserialize, Serialize};

use super::{InstanceRef, SubjectKind, SubjectModel};
use crate::types::{Role, UserId};

/// A user together with their role in the current organization.
///
/// This is both the acting principal an ability is built for and the model
/// used when a user record is itself the subject of a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
	pub id: UserId,
	pub role: Role,
}

impl User {
	pub fn new(id: impl Into<UserId>, role: Role) -> Self {
		Self {
			id: id.into(),
			role,
		}
	}
}

impl SubjectModel for User {
	const KIND: SubjectKind = SubjectKind::User;

	fn instance_ref(&self) -> InstanceRef<'_> {
		InstanceRef::User(self)
	}
}

define_subject_actions! {
	/// Actions on users.
	UserAction for User { Manage, Get, Update, Delete }
}
