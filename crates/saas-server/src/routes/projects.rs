// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Project HTTP handlers.
//!
//! Reads and creation are checked against the `Project` kind; update and
//! delete are checked against the stored project so that ownership
//! conditions apply.

use axum::{
	extract::{Path, State},
	http::StatusCode,
	response::IntoResponse,
	Json,
};
use saas_auth::{ProjectAction, ProjectId, Subject};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::api::AppState;
use crate::auth_middleware::RequireAuth;
use crate::authorize;
use crate::authz::get_user_membership;
use crate::error::ServerError;
use crate::store::{NewProject, ProjectRecord, ProjectUpdate};
use crate::validation::{create_slug, validate_name, validate_slug};

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
	pub name: String,
	#[serde(default)]
	pub description: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateProjectResponse {
	pub project_id: ProjectId,
	pub slug: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectsResponse {
	pub projects: Vec<ProjectRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectResponse {
	pub project: ProjectRecord,
}

/// GET /organizations/{slug}/projects - List projects, newest first.
#[instrument(skip(state, current_user), fields(actor_id = %current_user.id))]
pub async fn get_projects(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(slug): Path<String>,
) -> Result<Json<ProjectsResponse>, ServerError> {
	let membership = get_user_membership(&state, &slug, &current_user.id).await?;
	authorize!(&membership.ability, ProjectAction::Get, Subject::Type)?;

	let projects = state.store.projects(&membership.organization.id).await;
	Ok(Json(ProjectsResponse { projects }))
}

/// GET /organizations/{slug}/projects/{project_slug} - Project details.
#[instrument(skip(state, current_user), fields(actor_id = %current_user.id))]
pub async fn get_project(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path((slug, project_slug)): Path<(String, String)>,
) -> Result<Json<ProjectResponse>, ServerError> {
	let membership = get_user_membership(&state, &slug, &current_user.id).await?;
	authorize!(&membership.ability, ProjectAction::Get, Subject::Type)?;

	let project = state
		.store
		.project_by_slug(&membership.organization.id, &project_slug)
		.await
		.ok_or_else(|| {
			ServerError::NotFound(
				"Project not found or does not belong to this organization.".to_string(),
			)
		})?;

	Ok(Json(ProjectResponse { project }))
}

/// POST /organizations/{slug}/projects - Create a project owned by the caller.
#[instrument(skip(state, current_user, req), fields(actor_id = %current_user.id))]
pub async fn create_project(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(slug): Path<String>,
	Json(req): Json<CreateProjectRequest>,
) -> Result<impl IntoResponse, ServerError> {
	let membership = get_user_membership(&state, &slug, &current_user.id).await?;
	authorize!(&membership.ability, ProjectAction::Create, Subject::Type)?;

	validate_name("name", &req.name, 100)?;
	let project_slug = create_slug(&req.name);
	if !validate_slug(&project_slug, 1, 100) {
		return Err(ServerError::BadRequest(
			"Project name must contain letters or digits.".to_string(),
		));
	}

	let project = state
		.store
		.create_project(NewProject {
			name: req.name.trim().to_string(),
			slug: project_slug,
			description: req.description,
			organization_id: membership.organization.id.clone(),
			owner_id: current_user.id.clone(),
		})
		.await?;

	tracing::info!(project_id = %project.id, org_id = %project.organization_id, "project created");
	Ok((
		StatusCode::CREATED,
		Json(CreateProjectResponse {
			project_id: project.id,
			slug: project.slug,
		}),
	))
}

/// PUT /organizations/{slug}/projects/{project_id} - Update a project.
#[instrument(skip(state, current_user, req), fields(actor_id = %current_user.id))]
pub async fn update_project(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path((slug, project_id)): Path<(String, String)>,
	Json(req): Json<UpdateProjectRequest>,
) -> Result<StatusCode, ServerError> {
	let membership = get_user_membership(&state, &slug, &current_user.id).await?;
	let project = state
		.store
		.project_by_id(&membership.organization.id, &ProjectId::new(project_id))
		.await
		.ok_or_else(|| ServerError::NotFound("Project not found.".to_string()))?;

	authorize!(
		&membership.ability,
		ProjectAction::Update,
		(&project.subject()).into()
	)?;

	if let Some(name) = &req.name {
		validate_name("name", name, 100)?;
	}
	state
		.store
		.update_project(
			&project.id,
			ProjectUpdate {
				name: req.name.map(|n| n.trim().to_string()),
				description: req.description,
			},
		)
		.await?;

	Ok(StatusCode::NO_CONTENT)
}

/// DELETE /organizations/{slug}/projects/{project_id} - Delete a project.
#[instrument(skip(state, current_user), fields(actor_id = %current_user.id))]
pub async fn delete_project(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path((slug, project_id)): Path<(String, String)>,
) -> Result<StatusCode, ServerError> {
	let membership = get_user_membership(&state, &slug, &current_user.id).await?;
	let project = state
		.store
		.project_by_id(&membership.organization.id, &ProjectId::new(project_id))
		.await
		.ok_or_else(|| ServerError::NotFound("Project not found.".to_string()))?;

	authorize!(
		&membership.ability,
		ProjectAction::Delete,
		(&project.subject()).into()
	)?;

	state.store.delete_project(&project.id).await?;

	tracing::info!(project_id = %project.id, "project deleted");
	Ok(StatusCode::NO_CONTENT)
}
