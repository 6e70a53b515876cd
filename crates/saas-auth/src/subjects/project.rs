// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Project subject.

use serde::{Deserialize, Serialize};

use super::{InstanceRef, SubjectKind, SubjectModel};
use crate::types::{ProjectId, UserId};

/// The authorization-relevant view of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
	pub id: ProjectId,
	pub owner_id: UserId,
}

impl Project {
	pub fn new(id: impl Into<ProjectId>, owner_id: impl Into<UserId>) -> Self {
		Self {
			id: id.into(),
			owner_id: owner_id.into(),
		}
	}
}

impl SubjectModel for Project {
	const KIND: SubjectKind = SubjectKind::Project;

	fn instance_ref(&self) -> InstanceRef<'_> {
		InstanceRef::Project(self)
	}
}

define_subject_actions! {
	/// Actions on projects.
	ProjectAction for Project { Manage, Get, Create, Update, Delete }
}
