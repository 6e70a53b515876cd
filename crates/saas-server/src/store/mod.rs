// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Storage records and the repository trait the handlers depend on.
//!
//! Records carry everything an ability condition needs (owner ids, author
//! ids) so that authorization never has to go back to storage.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use saas_auth::{
	Billing, Invite, InviteId, OrgId, Organization, Project, ProjectId, Role, UserId,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
	#[error("{0}")]
	Duplicate(String),

	#[error("{0}")]
	NotFound(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
	pub id: UserId,
	pub name: Option<String>,
	pub email: String,
	pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationRecord {
	pub id: OrgId,
	pub name: String,
	pub slug: String,
	pub domain: Option<String>,
	pub should_attach_users_by_domain: bool,
	pub avatar_url: Option<String>,
	pub owner_id: UserId,
	pub created_at: DateTime<Utc>,
}

impl OrganizationRecord {
	/// The organization as an ability subject.
	pub fn subject(&self) -> Organization {
		Organization::new(self.id.clone(), self.owner_id.clone())
	}

	/// The organization's billing account as an ability subject.
	pub fn billing_subject(&self) -> Billing {
		Billing::new(self.id.clone())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
	pub organization_id: OrgId,
	pub user_id: UserId,
	pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
	pub id: ProjectId,
	pub name: String,
	pub slug: String,
	pub description: String,
	pub avatar_url: Option<String>,
	pub organization_id: OrgId,
	pub owner_id: UserId,
	pub created_at: DateTime<Utc>,
}

impl ProjectRecord {
	pub fn subject(&self) -> Project {
		Project::new(self.id.clone(), self.owner_id.clone())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteRecord {
	pub id: InviteId,
	pub email: String,
	pub role: Role,
	pub author_id: Option<UserId>,
	pub organization_id: OrgId,
	pub created_at: DateTime<Utc>,
}

impl InviteRecord {
	pub fn subject(&self) -> Invite {
		Invite::new(self.id.clone(), self.author_id.clone())
	}
}

#[derive(Debug, Clone)]
pub struct NewOrganization {
	pub name: String,
	pub slug: String,
	pub domain: Option<String>,
	pub should_attach_users_by_domain: bool,
	pub owner_id: UserId,
}

#[derive(Debug, Clone, Default)]
pub struct OrganizationUpdate {
	pub name: Option<String>,
	pub domain: Option<Option<String>>,
	pub should_attach_users_by_domain: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct NewProject {
	pub name: String,
	pub slug: String,
	pub description: String,
	pub organization_id: OrgId,
	pub owner_id: UserId,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectUpdate {
	pub name: Option<String>,
	pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewInvite {
	pub email: String,
	pub role: Role,
	pub author_id: UserId,
	pub organization_id: OrgId,
}

/// Repository over users, organizations, memberships, projects and invites.
#[async_trait]
pub trait Store: Send + Sync {
	async fn insert_user(&self, user: UserRecord) -> Result<UserRecord, StoreError>;
	async fn user(&self, id: &UserId) -> Option<UserRecord>;

	/// Creates the organization and makes its owner an `ADMIN` member.
	async fn create_organization(
		&self,
		org: NewOrganization,
	) -> Result<OrganizationRecord, StoreError>;
	async fn organization(&self, id: &OrgId) -> Option<OrganizationRecord>;
	async fn organization_by_slug(&self, slug: &str) -> Option<OrganizationRecord>;
	/// The organization that auto-attaches users whose email is on `domain`.
	async fn organization_attached_to_domain(&self, domain: &str) -> Option<OrganizationRecord>;
	async fn update_organization(
		&self,
		id: &OrgId,
		update: OrganizationUpdate,
	) -> Result<OrganizationRecord, StoreError>;
	/// Makes `new_owner` the owner and promotes them to `ADMIN`.
	async fn transfer_organization(
		&self,
		id: &OrgId,
		new_owner: &UserId,
	) -> Result<OrganizationRecord, StoreError>;
	/// Removes the organization with its members, projects and invites.
	async fn delete_organization(&self, id: &OrgId) -> Result<(), StoreError>;

	async fn member(&self, org_id: &OrgId, user_id: &UserId) -> Option<MemberRecord>;
	async fn member_with_email(&self, org_id: &OrgId, email: &str) -> Option<MemberRecord>;
	async fn add_member(
		&self,
		org_id: &OrgId,
		user_id: &UserId,
		role: Role,
	) -> Result<MemberRecord, StoreError>;
	async fn members(&self, org_id: &OrgId) -> Vec<MemberRecord>;

	/// Projects of an organization, newest first.
	async fn projects(&self, org_id: &OrgId) -> Vec<ProjectRecord>;
	async fn project_by_slug(&self, org_id: &OrgId, slug: &str) -> Option<ProjectRecord>;
	async fn project_by_id(&self, org_id: &OrgId, id: &ProjectId) -> Option<ProjectRecord>;
	async fn create_project(&self, project: NewProject) -> Result<ProjectRecord, StoreError>;
	async fn update_project(
		&self,
		id: &ProjectId,
		update: ProjectUpdate,
	) -> Result<ProjectRecord, StoreError>;
	async fn delete_project(&self, id: &ProjectId) -> Result<(), StoreError>;

	async fn invite(&self, id: &InviteId) -> Option<InviteRecord>;
	async fn invite_with_email(&self, org_id: &OrgId, email: &str) -> Option<InviteRecord>;
	async fn create_invite(&self, invite: NewInvite) -> Result<InviteRecord, StoreError>;
	async fn delete_invite(&self, id: &InviteId) -> Result<(), StoreError>;
	/// Adds `user_id` to the inviting organization with the invite's role and
	/// consumes the invite, in one step.
	async fn accept_invite(
		&self,
		id: &InviteId,
		user_id: &UserId,
	) -> Result<MemberRecord, StoreError>;
}
