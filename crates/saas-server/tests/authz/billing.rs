// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::http::{Method, StatusCode};
use saas_server::routes::billing::{BillingResponse, PROJECT_PRICE, SEAT_PRICE};

use super::support::{json_body, run_authz_cases, AuthzCase, TestApp};

#[tokio::test]
async fn test_billing_authorization() {
	let app = TestApp::new().await;
	let a = &app.fixtures.org_a;

	let cases = vec![
		AuthzCase {
			name: "admin_can_get_billing",
			method: Method::GET,
			path: "/organizations/org-a/billing".to_string(),
			user: Some(a.owner.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "billing_role_can_get_billing",
			method: Method::GET,
			path: "/organizations/org-a/billing".to_string(),
			user: Some(a.billing.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "member_cannot_get_billing",
			method: Method::GET,
			path: "/organizations/org-a/billing".to_string(),
			user: Some(a.member.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "other_org_billing_cannot_get_billing",
			method: Method::GET,
			path: "/organizations/org-a/billing".to_string(),
			user: Some(app.fixtures.org_b.billing.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
	];

	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn test_billing_charges_seats_and_projects() {
	let app = TestApp::new().await;
	let a = &app.fixtures.org_a;

	let response: BillingResponse =
		json_body(app.get("/organizations/org-a/billing", Some(&a.billing)).await).await;
	let billing = response.billing;

	// Owner and member pay for a seat; the billing user does not.
	assert_eq!(billing.seats.amount, 2);
	assert_eq!(billing.seats.unit, SEAT_PRICE);
	assert_eq!(billing.seats.price, 2 * SEAT_PRICE);
	assert_eq!(billing.projects.amount, 2);
	assert_eq!(billing.projects.price, 2 * PROJECT_PRICE);
	assert_eq!(billing.total, 2 * SEAT_PRICE + 2 * PROJECT_PRICE);
}
