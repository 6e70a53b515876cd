// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Billing subject.

use serde::{Deserialize, Serialize};

use super::{InstanceRef, SubjectKind, SubjectModel};
use crate::types::OrgId;

/// Billing information of an organization. Billing has no owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Billing {
	pub organization_id: OrgId,
}

impl Billing {
	pub fn new(organization_id: impl Into<OrgId>) -> Self {
		Self {
			organization_id: organization_id.into(),
		}
	}
}

impl SubjectModel for Billing {
	const KIND: SubjectKind = SubjectKind::Billing;

	fn instance_ref(&self) -> InstanceRef<'_> {
		InstanceRef::Billing(self)
	}
}

define_subject_actions! {
	/// Actions on billing.
	BillingAction for Billing { Manage, Get, Export }
}
