// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Invite subject.

use serde::{Deserialize, Serialize};

use super::{InstanceRef, SubjectKind, SubjectModel};
use crate::types::{InviteId, UserId};

/// The authorization-relevant view of an invite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invite {
	pub id: InviteId,
	/// `None` once the author's account is gone.
	#[serde(default)]
	pub author_id: Option<UserId>,
}

impl Invite {
	pub fn new(id: impl Into<InviteId>, author_id: Option<UserId>) -> Self {
		Self {
			id: id.into(),
			author_id,
		}
	}
}

impl SubjectModel for Invite {
	const KIND: SubjectKind = SubjectKind::Invite;

	fn instance_ref(&self) -> InstanceRef<'_> {
		InstanceRef::Invite(self)
	}
}

define_subject_actions! {
	/// Actions on invites.
	InviteAction for Invite { Manage, Create, Get, Update, Delete }
}
