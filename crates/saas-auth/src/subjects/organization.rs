// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Organization subject.

use serde::{Deserialize, Serialize};

use super::{InstanceRef, SubjectKind, SubjectModel};
use crate::types::{OrgId, UserId};

/// The authorization-relevant view of an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
	pub id: OrgId,
	pub owner_id: UserId,
}

impl Organization {
	pub fn new(id: impl Into<OrgId>, owner_id: impl Into<UserId>) -> Self {
		Self {
			id: id.into(),
			owner_id: owner_id.into(),
		}
	}
}

impl SubjectModel for Organization {
	const KIND: SubjectKind = SubjectKind::Organization;

	fn instance_ref(&self) -> InstanceRef<'_> {
		InstanceRef::Organization(self)
	}
}

define_subject_actions! {
	/// Actions on organizations.
	OrganizationAction for Organization { Manage, Update, Delete, TransferOwnership }
}
