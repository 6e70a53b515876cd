// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::{
	body::Body,
	http::{Method, Request, StatusCode},
};
use saas_server::routes::organizations::{MembershipResponse, PermissionsResponse};
use saas_server_config::AuthConfig;
use serde_json::json;
use tower::ServiceExt;

use super::support::{json_body, run_authz_cases, AuthzCase, TestApp};

#[tokio::test]
async fn test_org_authorization() {
	let app = TestApp::new().await;
	let a = &app.fixtures.org_a;
	let b = &app.fixtures.org_b;

	let cases = vec![
		// GET /organizations/{slug}/membership
		AuthzCase {
			name: "anonymous_cannot_get_membership",
			method: Method::GET,
			path: "/organizations/org-a/membership".to_string(),
			user: None,
			body: None,
			expected_status: StatusCode::UNAUTHORIZED,
		},
		AuthzCase {
			name: "owner_can_get_membership",
			method: Method::GET,
			path: "/organizations/org-a/membership".to_string(),
			user: Some(a.owner.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "billing_can_get_membership",
			method: Method::GET,
			path: "/organizations/org-a/membership".to_string(),
			user: Some(a.billing.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "non_member_cannot_get_membership",
			method: Method::GET,
			path: "/organizations/org-a/membership".to_string(),
			user: Some(app.fixtures.loner.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "other_org_member_cannot_get_membership",
			method: Method::GET,
			path: "/organizations/org-a/membership".to_string(),
			user: Some(b.member.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "unknown_org_is_not_found",
			method: Method::GET,
			path: "/organizations/no-such-org/membership".to_string(),
			user: Some(a.owner.clone()),
			body: None,
			expected_status: StatusCode::NOT_FOUND,
		},
		// PUT /organizations/{slug}
		AuthzCase {
			name: "owner_can_update_org",
			method: Method::PUT,
			path: "/organizations/org-a".to_string(),
			user: Some(a.owner.clone()),
			body: Some(json!({"name": "Organization A", "domain": "org-a.test"})),
			expected_status: StatusCode::NO_CONTENT,
		},
		AuthzCase {
			name: "member_cannot_update_org",
			method: Method::PUT,
			path: "/organizations/org-a".to_string(),
			user: Some(a.member.clone()),
			body: Some(json!({"name": "Should Not Update"})),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "billing_cannot_update_org",
			method: Method::PUT,
			path: "/organizations/org-a".to_string(),
			user: Some(a.billing.clone()),
			body: Some(json!({"name": "Should Not Update"})),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "owner_cannot_take_another_orgs_domain",
			method: Method::PUT,
			path: "/organizations/org-a".to_string(),
			user: Some(a.owner.clone()),
			body: Some(json!({"name": "Organization A", "domain": "org-b.test"})),
			expected_status: StatusCode::CONFLICT,
		},
		// PATCH /organizations/{slug}/owner
		AuthzCase {
			name: "member_cannot_transfer_ownership",
			method: Method::PATCH,
			path: "/organizations/org-a/owner".to_string(),
			user: Some(a.member.clone()),
			body: Some(json!({"transfer_to_user_id": a.member.id()})),
			expected_status: StatusCode::FORBIDDEN,
		},
		// DELETE /organizations/{slug}
		AuthzCase {
			name: "member_cannot_delete_org",
			method: Method::DELETE,
			path: "/organizations/org-a".to_string(),
			user: Some(a.member.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "billing_cannot_delete_org",
			method: Method::DELETE,
			path: "/organizations/org-a".to_string(),
			user: Some(a.billing.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "other_org_owner_cannot_delete_org",
			method: Method::DELETE,
			path: "/organizations/org-a".to_string(),
			user: Some(b.owner.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "owner_can_delete_org",
			method: Method::DELETE,
			path: "/organizations/org-a".to_string(),
			user: Some(a.owner.clone()),
			body: None,
			expected_status: StatusCode::NO_CONTENT,
		},
		AuthzCase {
			name: "deleted_org_is_not_found",
			method: Method::GET,
			path: "/organizations/org-a/membership".to_string(),
			user: Some(a.owner.clone()),
			body: None,
			expected_status: StatusCode::NOT_FOUND,
		},
	];

	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn test_create_organization() {
	let app = TestApp::new().await;
	let loner = &app.fixtures.loner;

	let cases = vec![
		AuthzCase {
			name: "anonymous_cannot_create_org",
			method: Method::POST,
			path: "/organizations".to_string(),
			user: None,
			body: Some(json!({"name": "Nope"})),
			expected_status: StatusCode::UNAUTHORIZED,
		},
		AuthzCase {
			name: "any_user_can_create_org",
			method: Method::POST,
			path: "/organizations".to_string(),
			user: Some(loner.clone()),
			body: Some(json!({"name": "Loner Corp", "domain": "loner.test"})),
			expected_status: StatusCode::CREATED,
		},
		AuthzCase {
			name: "creator_is_admin_of_new_org",
			method: Method::GET,
			path: "/organizations/loner-corp/permissions".to_string(),
			user: Some(loner.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "duplicate_slug_conflicts",
			method: Method::POST,
			path: "/organizations".to_string(),
			user: Some(loner.clone()),
			body: Some(json!({"name": "Loner  Corp"})),
			expected_status: StatusCode::CONFLICT,
		},
		AuthzCase {
			name: "duplicate_domain_conflicts",
			method: Method::POST,
			path: "/organizations".to_string(),
			user: Some(loner.clone()),
			body: Some(json!({"name": "Another Corp", "domain": "org-a.test"})),
			expected_status: StatusCode::CONFLICT,
		},
		AuthzCase {
			name: "name_without_slug_characters_is_rejected",
			method: Method::POST,
			path: "/organizations".to_string(),
			user: Some(loner.clone()),
			body: Some(json!({"name": "!!!"})),
			expected_status: StatusCode::BAD_REQUEST,
		},
	];

	run_authz_cases(&app, &cases).await;

	let response = app
		.get("/organizations/loner-corp/membership", Some(loner))
		.await;
	let membership: MembershipResponse = json_body(response).await;
	assert_eq!(membership.role, saas_auth::Role::Admin);
}

#[tokio::test]
async fn test_update_keeps_domain_unless_given() {
	let app = TestApp::new().await;
	let a = &app.fixtures.org_a;

	let cases = vec![
		AuthzCase {
			name: "owner_enables_auto_attach",
			method: Method::PUT,
			path: "/organizations/org-a".to_string(),
			user: Some(a.owner.clone()),
			body: Some(json!({
				"name": "Organization A",
				"domain": "acme.com",
				"should_attach_users_by_domain": true,
			})),
			expected_status: StatusCode::NO_CONTENT,
		},
		AuthzCase {
			name: "owner_renames_org",
			method: Method::PUT,
			path: "/organizations/org-a".to_string(),
			user: Some(a.owner.clone()),
			body: Some(json!({"name": "Org A Renamed"})),
			expected_status: StatusCode::NO_CONTENT,
		},
	];
	run_authz_cases(&app, &cases).await;

	let org = app.state.store.organization(&a.org.id).await.unwrap();
	assert_eq!(org.name, "Org A Renamed");
	assert_eq!(org.domain.as_deref(), Some("acme.com"));
	assert!(org.should_attach_users_by_domain);

	let response = app
		.put(
			"/organizations/org-a",
			Some(&a.owner),
			json!({"name": "Org A Renamed", "domain": null}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::NO_CONTENT);

	let org = app.state.store.organization(&a.org.id).await.unwrap();
	assert_eq!(org.domain, None);
	assert!(!org.should_attach_users_by_domain);
}

#[tokio::test]
async fn test_permission_flags_follow_role() {
	let app = TestApp::new().await;
	let a = &app.fixtures.org_a;
	let path = "/organizations/org-a/permissions";

	let admin: PermissionsResponse = json_body(app.get(path, Some(&a.owner)).await).await;
	assert_eq!(
		admin,
		PermissionsResponse {
			can_update_organization: true,
			can_delete_organization: true,
			can_transfer_ownership: true,
			can_get_billing: true,
			can_get_projects: true,
			can_create_project: true,
			can_create_invite: true,
		}
	);

	let member: PermissionsResponse = json_body(app.get(path, Some(&a.member)).await).await;
	assert_eq!(
		member,
		PermissionsResponse {
			can_update_organization: false,
			can_delete_organization: false,
			can_transfer_ownership: false,
			can_get_billing: false,
			can_get_projects: true,
			can_create_project: true,
			can_create_invite: false,
		}
	);

	let billing: PermissionsResponse = json_body(app.get(path, Some(&a.billing)).await).await;
	assert!(billing.can_get_billing);
	assert!(!billing.can_get_projects);
	assert!(!billing.can_create_project);
	assert!(!billing.can_update_organization);
}

#[tokio::test]
async fn test_transfer_ownership() {
	let app = TestApp::new().await;
	let a = &app.fixtures.org_a;

	let cases = vec![
		AuthzCase {
			name: "cannot_transfer_to_non_member",
			method: Method::PATCH,
			path: "/organizations/org-a/owner".to_string(),
			user: Some(a.owner.clone()),
			body: Some(json!({"transfer_to_user_id": app.fixtures.loner.id()})),
			expected_status: StatusCode::BAD_REQUEST,
		},
		AuthzCase {
			name: "owner_can_transfer_to_member",
			method: Method::PATCH,
			path: "/organizations/org-a/owner".to_string(),
			user: Some(a.owner.clone()),
			body: Some(json!({"transfer_to_user_id": a.member.id()})),
			expected_status: StatusCode::NO_CONTENT,
		},
		AuthzCase {
			name: "new_owner_can_delete_org",
			method: Method::DELETE,
			path: "/organizations/org-a".to_string(),
			user: Some(a.member.clone()),
			body: None,
			expected_status: StatusCode::NO_CONTENT,
		},
	];

	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn test_untrusted_identity_header_is_rejected() {
	let app = TestApp::with_auth(AuthConfig {
		trust_identity_header: false,
		..AuthConfig::default()
	})
	.await;

	let response = app
		.get("/organizations/org-a/membership", Some(&app.fixtures.org_a.owner))
		.await;
	assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_gateway_secret_gates_identity_header() {
	let app = TestApp::with_auth(AuthConfig {
		environment: "production".to_string(),
		gateway_secret: Some("gateway-token".to_string()),
		..AuthConfig::default()
	})
	.await;
	let owner = &app.fixtures.org_a.owner;

	let without_secret = app
		.get("/organizations/org-a/membership", Some(owner))
		.await;
	assert_eq!(without_secret.status(), StatusCode::UNAUTHORIZED);

	let (name, value) = owner.auth_header();
	let request = Request::builder()
		.uri("/organizations/org-a/membership")
		.header(name, value)
		.header("authorization", "Bearer gateway-token")
		.body(Body::empty())
		.unwrap();
	let response = app.router.clone().oneshot(request).await.unwrap();
	assert_eq!(response.status(), StatusCode::OK);

	let membership: MembershipResponse = json_body(response).await;
	assert_eq!(membership.user_id, *owner.id());
}
