// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-process [`Store`] backed by vectors behind a `tokio` read/write lock.

use async_trait::async_trait;
use chrono::Utc;
use saas_auth::{InviteId, OrgId, ProjectId, Role, UserId};
use tokio::sync::RwLock;
use tracing::debug;

use super::{
	InviteRecord, MemberRecord, NewInvite, NewOrganization, NewProject, OrganizationRecord,
	OrganizationUpdate, ProjectRecord, ProjectUpdate, Store, StoreError, UserRecord,
};

#[derive(Debug, Default)]
struct Tables {
	users: Vec<UserRecord>,
	organizations: Vec<OrganizationRecord>,
	members: Vec<MemberRecord>,
	projects: Vec<ProjectRecord>,
	invites: Vec<InviteRecord>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
	tables: RwLock<Tables>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl Store for MemoryStore {
	async fn insert_user(&self, user: UserRecord) -> Result<UserRecord, StoreError> {
		let mut tables = self.tables.write().await;
		if tables
			.users
			.iter()
			.any(|u| u.id == user.id || u.email.eq_ignore_ascii_case(&user.email))
		{
			return Err(StoreError::Duplicate(
				"A user with this id or email already exists.".to_string(),
			));
		}
		tables.users.push(user.clone());
		Ok(user)
	}

	async fn user(&self, id: &UserId) -> Option<UserRecord> {
		let tables = self.tables.read().await;
		tables.users.iter().find(|u| &u.id == id).cloned()
	}

	async fn create_organization(
		&self,
		org: NewOrganization,
	) -> Result<OrganizationRecord, StoreError> {
		let mut tables = self.tables.write().await;

		if tables.organizations.iter().any(|o| o.slug == org.slug) {
			return Err(StoreError::Duplicate(
				"An organization with this slug already exists.".to_string(),
			));
		}
		if let Some(domain) = &org.domain {
			if tables
				.organizations
				.iter()
				.any(|o| o.domain.as_deref() == Some(domain.as_str()))
			{
				return Err(StoreError::Duplicate(
					"Another organization with same domain already exists.".to_string(),
				));
			}
		}

		let record = OrganizationRecord {
			id: OrgId::generate(),
			name: org.name,
			slug: org.slug,
			domain: org.domain,
			should_attach_users_by_domain: org.should_attach_users_by_domain,
			avatar_url: None,
			owner_id: org.owner_id.clone(),
			created_at: Utc::now(),
		};
		tables.members.push(MemberRecord {
			organization_id: record.id.clone(),
			user_id: org.owner_id,
			role: Role::Admin,
		});
		tables.organizations.push(record.clone());

		debug!(org_id = %record.id, slug = %record.slug, "organization created");
		Ok(record)
	}

	async fn organization(&self, id: &OrgId) -> Option<OrganizationRecord> {
		let tables = self.tables.read().await;
		tables.organizations.iter().find(|o| &o.id == id).cloned()
	}

	async fn organization_by_slug(&self, slug: &str) -> Option<OrganizationRecord> {
		let tables = self.tables.read().await;
		tables.organizations.iter().find(|o| o.slug == slug).cloned()
	}

	async fn organization_attached_to_domain(&self, domain: &str) -> Option<OrganizationRecord> {
		let tables = self.tables.read().await;
		tables
			.organizations
			.iter()
			.find(|o| {
				o.should_attach_users_by_domain
					&& o.domain
						.as_deref()
						.is_some_and(|d| d.eq_ignore_ascii_case(domain))
			})
			.cloned()
	}

	async fn update_organization(
		&self,
		id: &OrgId,
		update: OrganizationUpdate,
	) -> Result<OrganizationRecord, StoreError> {
		let mut tables = self.tables.write().await;

		if let Some(Some(domain)) = &update.domain {
			if tables
				.organizations
				.iter()
				.any(|o| &o.id != id && o.domain.as_deref() == Some(domain.as_str()))
			{
				return Err(StoreError::Duplicate(
					"Another organization with same domain already exists.".to_string(),
				));
			}
		}

		let org = tables
			.organizations
			.iter_mut()
			.find(|o| &o.id == id)
			.ok_or_else(|| StoreError::NotFound("Organization not found.".to_string()))?;

		if let Some(name) = update.name {
			org.name = name;
		}
		if let Some(domain) = update.domain {
			org.domain = domain;
		}
		if let Some(attach) = update.should_attach_users_by_domain {
			org.should_attach_users_by_domain = attach;
		}
		if org.domain.is_none() {
			org.should_attach_users_by_domain = false;
		}
		Ok(org.clone())
	}

	async fn transfer_organization(
		&self,
		id: &OrgId,
		new_owner: &UserId,
	) -> Result<OrganizationRecord, StoreError> {
		let mut tables = self.tables.write().await;
		let Tables {
			organizations,
			members,
			..
		} = &mut *tables;

		let member = members
			.iter_mut()
			.find(|m| &m.organization_id == id && &m.user_id == new_owner)
			.ok_or_else(|| {
				StoreError::NotFound("Target user is not a member of this organization.".to_string())
			})?;
		let org = organizations
			.iter_mut()
			.find(|o| &o.id == id)
			.ok_or_else(|| StoreError::NotFound("Organization not found.".to_string()))?;

		member.role = Role::Admin;
		org.owner_id = new_owner.clone();
		debug!(org_id = %org.id, owner_id = %org.owner_id, "organization ownership transferred");
		Ok(org.clone())
	}

	async fn delete_organization(&self, id: &OrgId) -> Result<(), StoreError> {
		let mut tables = self.tables.write().await;
		let before = tables.organizations.len();
		tables.organizations.retain(|o| &o.id != id);
		if tables.organizations.len() == before {
			return Err(StoreError::NotFound("Organization not found.".to_string()));
		}
		tables.members.retain(|m| &m.organization_id != id);
		tables.projects.retain(|p| &p.organization_id != id);
		tables.invites.retain(|i| &i.organization_id != id);
		Ok(())
	}

	async fn member(&self, org_id: &OrgId, user_id: &UserId) -> Option<MemberRecord> {
		let tables = self.tables.read().await;
		tables
			.members
			.iter()
			.find(|m| &m.organization_id == org_id && &m.user_id == user_id)
			.cloned()
	}

	async fn member_with_email(&self, org_id: &OrgId, email: &str) -> Option<MemberRecord> {
		let tables = self.tables.read().await;
		let user = tables
			.users
			.iter()
			.find(|u| u.email.eq_ignore_ascii_case(email))?;
		tables
			.members
			.iter()
			.find(|m| &m.organization_id == org_id && m.user_id == user.id)
			.cloned()
	}

	async fn add_member(
		&self,
		org_id: &OrgId,
		user_id: &UserId,
		role: Role,
	) -> Result<MemberRecord, StoreError> {
		let mut tables = self.tables.write().await;
		if !tables.organizations.iter().any(|o| &o.id == org_id) {
			return Err(StoreError::NotFound("Organization not found.".to_string()));
		}
		if tables
			.members
			.iter()
			.any(|m| &m.organization_id == org_id && &m.user_id == user_id)
		{
			return Err(StoreError::Duplicate(
				"User is already a member of this organization.".to_string(),
			));
		}
		let member = MemberRecord {
			organization_id: org_id.clone(),
			user_id: user_id.clone(),
			role,
		};
		tables.members.push(member.clone());
		Ok(member)
	}

	async fn members(&self, org_id: &OrgId) -> Vec<MemberRecord> {
		let tables = self.tables.read().await;
		tables
			.members
			.iter()
			.filter(|m| &m.organization_id == org_id)
			.cloned()
			.collect()
	}

	async fn projects(&self, org_id: &OrgId) -> Vec<ProjectRecord> {
		let tables = self.tables.read().await;
		let mut projects: Vec<_> = tables
			.projects
			.iter()
			.rev()
			.filter(|p| &p.organization_id == org_id)
			.cloned()
			.collect();
		// Stable sort: equal timestamps keep reverse insertion order.
		projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
		projects
	}

	async fn project_by_slug(&self, org_id: &OrgId, slug: &str) -> Option<ProjectRecord> {
		let tables = self.tables.read().await;
		tables
			.projects
			.iter()
			.find(|p| &p.organization_id == org_id && p.slug == slug)
			.cloned()
	}

	async fn project_by_id(&self, org_id: &OrgId, id: &ProjectId) -> Option<ProjectRecord> {
		let tables = self.tables.read().await;
		tables
			.projects
			.iter()
			.find(|p| &p.organization_id == org_id && &p.id == id)
			.cloned()
	}

	async fn create_project(&self, project: NewProject) -> Result<ProjectRecord, StoreError> {
		let mut tables = self.tables.write().await;
		if tables
			.projects
			.iter()
			.any(|p| p.organization_id == project.organization_id && p.slug == project.slug)
		{
			return Err(StoreError::Duplicate(
				"A project with this slug already exists in the organization.".to_string(),
			));
		}
		let record = ProjectRecord {
			id: ProjectId::generate(),
			name: project.name,
			slug: project.slug,
			description: project.description,
			avatar_url: None,
			organization_id: project.organization_id,
			owner_id: project.owner_id,
			created_at: Utc::now(),
		};
		tables.projects.push(record.clone());
		Ok(record)
	}

	async fn update_project(
		&self,
		id: &ProjectId,
		update: ProjectUpdate,
	) -> Result<ProjectRecord, StoreError> {
		let mut tables = self.tables.write().await;
		let project = tables
			.projects
			.iter_mut()
			.find(|p| &p.id == id)
			.ok_or_else(|| StoreError::NotFound("Project not found.".to_string()))?;
		if let Some(name) = update.name {
			project.name = name;
		}
		if let Some(description) = update.description {
			project.description = description;
		}
		Ok(project.clone())
	}

	async fn delete_project(&self, id: &ProjectId) -> Result<(), StoreError> {
		let mut tables = self.tables.write().await;
		let before = tables.projects.len();
		tables.projects.retain(|p| &p.id != id);
		if tables.projects.len() == before {
			return Err(StoreError::NotFound("Project not found.".to_string()));
		}
		Ok(())
	}

	async fn invite(&self, id: &InviteId) -> Option<InviteRecord> {
		let tables = self.tables.read().await;
		tables.invites.iter().find(|i| &i.id == id).cloned()
	}

	async fn invite_with_email(&self, org_id: &OrgId, email: &str) -> Option<InviteRecord> {
		let tables = self.tables.read().await;
		tables
			.invites
			.iter()
			.find(|i| &i.organization_id == org_id && i.email.eq_ignore_ascii_case(email))
			.cloned()
	}

	async fn create_invite(&self, invite: NewInvite) -> Result<InviteRecord, StoreError> {
		let mut tables = self.tables.write().await;
		if tables.invites.iter().any(|i| {
			i.organization_id == invite.organization_id && i.email.eq_ignore_ascii_case(&invite.email)
		}) {
			return Err(StoreError::Duplicate(
				"An invite for this email already exists.".to_string(),
			));
		}
		let record = InviteRecord {
			id: InviteId::generate(),
			email: invite.email,
			role: invite.role,
			author_id: Some(invite.author_id),
			organization_id: invite.organization_id,
			created_at: Utc::now(),
		};
		tables.invites.push(record.clone());
		Ok(record)
	}

	async fn delete_invite(&self, id: &InviteId) -> Result<(), StoreError> {
		let mut tables = self.tables.write().await;
		let before = tables.invites.len();
		tables.invites.retain(|i| &i.id != id);
		if tables.invites.len() == before {
			return Err(StoreError::NotFound("Invite not found.".to_string()));
		}
		Ok(())
	}

	async fn accept_invite(
		&self,
		id: &InviteId,
		user_id: &UserId,
	) -> Result<MemberRecord, StoreError> {
		let mut tables = self.tables.write().await;
		let position = tables
			.invites
			.iter()
			.position(|i| &i.id == id)
			.ok_or_else(|| StoreError::NotFound("Invite not found.".to_string()))?;
		let invite = &tables.invites[position];

		if tables
			.members
			.iter()
			.any(|m| m.organization_id == invite.organization_id && &m.user_id == user_id)
		{
			return Err(StoreError::Duplicate(
				"User is already a member of this organization.".to_string(),
			));
		}

		let invite = tables.invites.remove(position);
		let member = MemberRecord {
			organization_id: invite.organization_id,
			user_id: user_id.clone(),
			role: invite.role,
		};
		tables.members.push(member.clone());
		debug!(invite_id = %invite.id, org_id = %member.organization_id, "invite consumed");
		Ok(member)
	}
}
