// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::http::{Method, StatusCode};
use saas_server::routes::projects::{CreateProjectResponse, ProjectsResponse};
use serde_json::json;

use super::support::{json_body, run_authz_cases, AuthzCase, TestApp};

#[tokio::test]
async fn test_project_read_authorization() {
	let app = TestApp::new().await;
	let a = &app.fixtures.org_a;

	let cases = vec![
		AuthzCase {
			name: "member_can_list_projects",
			method: Method::GET,
			path: "/organizations/org-a/projects".to_string(),
			user: Some(a.member.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "billing_cannot_list_projects",
			method: Method::GET,
			path: "/organizations/org-a/projects".to_string(),
			user: Some(a.billing.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "non_member_cannot_list_projects",
			method: Method::GET,
			path: "/organizations/org-a/projects".to_string(),
			user: Some(app.fixtures.loner.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "member_can_get_project",
			method: Method::GET,
			path: "/organizations/org-a/projects/owner-project".to_string(),
			user: Some(a.member.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "unknown_project_is_not_found",
			method: Method::GET,
			path: "/organizations/org-a/projects/no-such-project".to_string(),
			user: Some(a.member.clone()),
			body: None,
			expected_status: StatusCode::NOT_FOUND,
		},
		AuthzCase {
			name: "billing_cannot_get_project",
			method: Method::GET,
			path: "/organizations/org-a/projects/owner-project".to_string(),
			user: Some(a.billing.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
	];

	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn test_project_write_authorization() {
	let app = TestApp::new().await;
	let a = &app.fixtures.org_a;
	let b = &app.fixtures.org_b;
	let member_project = a.member_project.id.to_string();
	let owner_project = a.owner_project.id.to_string();

	let cases = vec![
		// POST /organizations/{slug}/projects
		AuthzCase {
			name: "member_can_create_project",
			method: Method::POST,
			path: "/organizations/org-a/projects".to_string(),
			user: Some(a.member.clone()),
			body: Some(json!({"name": "Side Quest", "description": "New"})),
			expected_status: StatusCode::CREATED,
		},
		AuthzCase {
			name: "billing_cannot_create_project",
			method: Method::POST,
			path: "/organizations/org-a/projects".to_string(),
			user: Some(a.billing.clone()),
			body: Some(json!({"name": "Nope"})),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "duplicate_project_slug_conflicts",
			method: Method::POST,
			path: "/organizations/org-a/projects".to_string(),
			user: Some(a.member.clone()),
			body: Some(json!({"name": "Side  Quest"})),
			expected_status: StatusCode::CONFLICT,
		},
		// PUT /organizations/{slug}/projects/{project_id}
		AuthzCase {
			name: "member_can_update_own_project",
			method: Method::PUT,
			path: format!("/organizations/org-a/projects/{member_project}"),
			user: Some(a.member.clone()),
			body: Some(json!({"description": "Updated by owner"})),
			expected_status: StatusCode::NO_CONTENT,
		},
		AuthzCase {
			name: "member_cannot_update_foreign_project",
			method: Method::PUT,
			path: format!("/organizations/org-a/projects/{owner_project}"),
			user: Some(a.member.clone()),
			body: Some(json!({"description": "Hijacked"})),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "admin_can_update_any_project",
			method: Method::PUT,
			path: format!("/organizations/org-a/projects/{member_project}"),
			user: Some(a.owner.clone()),
			body: Some(json!({"name": "Renamed"})),
			expected_status: StatusCode::NO_CONTENT,
		},
		AuthzCase {
			name: "billing_cannot_update_project",
			method: Method::PUT,
			path: format!("/organizations/org-a/projects/{member_project}"),
			user: Some(a.billing.clone()),
			body: Some(json!({"name": "Nope"})),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "update_unknown_project_is_not_found",
			method: Method::PUT,
			path: "/organizations/org-a/projects/does-not-exist".to_string(),
			user: Some(a.owner.clone()),
			body: Some(json!({"name": "Ghost"})),
			expected_status: StatusCode::NOT_FOUND,
		},
		AuthzCase {
			name: "project_of_other_org_is_not_found",
			method: Method::PUT,
			path: format!("/organizations/org-a/projects/{}", b.member_project.id),
			user: Some(a.owner.clone()),
			body: Some(json!({"name": "Cross org"})),
			expected_status: StatusCode::NOT_FOUND,
		},
		// DELETE /organizations/{slug}/projects/{project_id}
		AuthzCase {
			name: "member_cannot_delete_foreign_project",
			method: Method::DELETE,
			path: format!("/organizations/org-a/projects/{owner_project}"),
			user: Some(a.member.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "other_org_member_cannot_delete_project",
			method: Method::DELETE,
			path: format!("/organizations/org-a/projects/{member_project}"),
			user: Some(b.member.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "member_can_delete_own_project",
			method: Method::DELETE,
			path: format!("/organizations/org-a/projects/{member_project}"),
			user: Some(a.member.clone()),
			body: None,
			expected_status: StatusCode::NO_CONTENT,
		},
		AuthzCase {
			name: "admin_can_delete_any_project",
			method: Method::DELETE,
			path: format!("/organizations/org-a/projects/{owner_project}"),
			user: Some(a.owner.clone()),
			body: None,
			expected_status: StatusCode::NO_CONTENT,
		},
	];

	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn test_created_project_is_listed_first_and_owned_by_caller() {
	let app = TestApp::new().await;
	let a = &app.fixtures.org_a;

	let response = app
		.post(
			"/organizations/org-a/projects",
			Some(&a.member),
			json!({"name": "Fresh Project"}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::CREATED);
	let created: CreateProjectResponse = json_body(response).await;
	assert_eq!(created.slug, "fresh-project");

	let listed: ProjectsResponse =
		json_body(app.get("/organizations/org-a/projects", Some(&a.member)).await).await;
	let slugs: Vec<_> = listed.projects.iter().map(|p| p.slug.as_str()).collect();
	assert_eq!(slugs, vec!["fresh-project", "owner-project", "member-project"]);
	assert_eq!(&listed.projects[0].owner_id, a.member.id());

	// The creator owns it, so the blanket delete deny is overridden.
	let response = app
		.delete(
			&format!("/organizations/org-a/projects/{}", created.project_id),
			Some(&a.member),
		)
		.await;
	assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
