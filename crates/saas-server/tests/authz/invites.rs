// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::http::{Method, StatusCode};
use saas_auth::Role;
use saas_server::routes::{invites::AcceptInviteResponse, organizations::MembershipResponse};
use serde_json::json;

use super::support::{json_body, run_authz_cases, AuthzCase, TestApp};

#[tokio::test]
async fn test_create_invite_authorization() {
	let app = TestApp::new().await;
	let a = &app.fixtures.org_a;

	let cases = vec![
		AuthzCase {
			name: "admin_can_create_invite",
			method: Method::POST,
			path: "/organizations/org-a/invites".to_string(),
			user: Some(a.owner.clone()),
			body: Some(json!({"email": "New.Hire@Elsewhere.test", "role": "MEMBER"})),
			expected_status: StatusCode::CREATED,
		},
		AuthzCase {
			name: "member_cannot_create_invite",
			method: Method::POST,
			path: "/organizations/org-a/invites".to_string(),
			user: Some(a.member.clone()),
			body: Some(json!({"email": "friend@elsewhere.test", "role": "MEMBER"})),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "billing_cannot_create_invite",
			method: Method::POST,
			path: "/organizations/org-a/invites".to_string(),
			user: Some(a.billing.clone()),
			body: Some(json!({"email": "friend@elsewhere.test", "role": "BILLING"})),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "duplicate_invite_conflicts",
			method: Method::POST,
			path: "/organizations/org-a/invites".to_string(),
			user: Some(a.owner.clone()),
			body: Some(json!({"email": "new.hire@elsewhere.test", "role": "ADMIN"})),
			expected_status: StatusCode::CONFLICT,
		},
		AuthzCase {
			name: "existing_member_email_conflicts",
			method: Method::POST,
			path: "/organizations/org-a/invites".to_string(),
			user: Some(a.owner.clone()),
			body: Some(json!({"email": a.member.user.email, "role": "MEMBER"})),
			expected_status: StatusCode::CONFLICT,
		},
		AuthzCase {
			name: "invalid_email_is_rejected",
			method: Method::POST,
			path: "/organizations/org-a/invites".to_string(),
			user: Some(a.owner.clone()),
			body: Some(json!({"email": "not-an-email", "role": "MEMBER"})),
			expected_status: StatusCode::BAD_REQUEST,
		},
		AuthzCase {
			name: "owner_enables_domain_auto_attach",
			method: Method::PUT,
			path: "/organizations/org-a".to_string(),
			user: Some(a.owner.clone()),
			body: Some(json!({
				"name": "Organization A",
				"domain": "org-a.test",
				"should_attach_users_by_domain": true,
			})),
			expected_status: StatusCode::NO_CONTENT,
		},
		AuthzCase {
			name: "auto_attached_domain_cannot_be_invited",
			method: Method::POST,
			path: "/organizations/org-a/invites".to_string(),
			user: Some(a.owner.clone()),
			body: Some(json!({"email": "colleague@org-a.test", "role": "MEMBER"})),
			expected_status: StatusCode::BAD_REQUEST,
		},
	];

	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn test_accept_invite() {
	let app = TestApp::new().await;
	let a = &app.fixtures.org_a;
	let accept = format!("/invites/{}/accept", a.invite.id);

	let cases = vec![
		AuthzCase {
			name: "anonymous_cannot_accept",
			method: Method::POST,
			path: accept.clone(),
			user: None,
			body: None,
			expected_status: StatusCode::UNAUTHORIZED,
		},
		AuthzCase {
			name: "other_user_cannot_accept",
			method: Method::POST,
			path: accept.clone(),
			user: Some(app.fixtures.loner.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "invite_is_public_before_acceptance",
			method: Method::GET,
			path: format!("/invites/{}", a.invite.id),
			user: None,
			body: None,
			expected_status: StatusCode::OK,
		},
	];
	run_authz_cases(&app, &cases).await;

	let response = app.post(&accept, Some(&a.invitee), json!({})).await;
	assert_eq!(response.status(), StatusCode::OK);
	let accepted: AcceptInviteResponse = json_body(response).await;
	assert_eq!(accepted.organization_id, a.org.id);
	assert_eq!(accepted.role, Role::Member);

	let membership: MembershipResponse = json_body(
		app.get("/organizations/org-a/membership", Some(&a.invitee))
			.await,
	)
	.await;
	assert_eq!(membership.role, Role::Member);

	let response = app.post(&accept, Some(&a.invitee), json!({})).await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_revoke_invite_authorization() {
	let app = TestApp::new().await;
	let a = &app.fixtures.org_a;
	let b = &app.fixtures.org_b;

	let cases = vec![
		AuthzCase {
			name: "member_cannot_revoke_invite",
			method: Method::DELETE,
			path: format!("/organizations/org-a/invites/{}", a.invite.id),
			user: Some(a.member.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "invite_of_other_org_is_not_found",
			method: Method::DELETE,
			path: format!("/organizations/org-a/invites/{}", b.invite.id),
			user: Some(a.owner.clone()),
			body: None,
			expected_status: StatusCode::NOT_FOUND,
		},
		AuthzCase {
			name: "admin_can_revoke_invite",
			method: Method::DELETE,
			path: format!("/organizations/org-a/invites/{}", a.invite.id),
			user: Some(a.owner.clone()),
			body: None,
			expected_status: StatusCode::NO_CONTENT,
		},
		AuthzCase {
			name: "revoked_invite_is_gone",
			method: Method::GET,
			path: format!("/invites/{}", a.invite.id),
			user: None,
			body: None,
			expected_status: StatusCode::NOT_FOUND,
		},
	];

	run_authz_cases(&app, &cases).await;
}
