// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
	body::Body,
	http::{header::HeaderName, HeaderValue, Method, Request, Response, StatusCode},
	Router,
};
use saas_auth::{Role, UserId};
use saas_server::{
	create_app_state, create_router,
	store::{
		InviteRecord, MemoryStore, NewInvite, NewOrganization, NewProject, OrganizationRecord,
		ProjectRecord, Store, UserRecord,
	},
	AppState,
};
use saas_server_config::AuthConfig;
use serde::{de::DeserializeOwned, Serialize};
use tower::ServiceExt;

#[derive(Clone)]
pub struct TestUser {
	pub user: UserRecord,
}

impl TestUser {
	pub fn id(&self) -> &UserId {
		&self.user.id
	}

	pub fn auth_header(&self) -> (HeaderName, HeaderValue) {
		(
			HeaderName::from_static("x-user-id"),
			HeaderValue::from_str(self.user.id.as_str()).unwrap(),
		)
	}
}

#[derive(Clone)]
pub struct OrgFixture {
	pub org: OrganizationRecord,
	pub owner: TestUser,
	pub member: TestUser,
	pub billing: TestUser,
	/// Owned by `member`.
	pub member_project: ProjectRecord,
	/// Owned by `owner`.
	pub owner_project: ProjectRecord,
	/// Authored by `owner`, addressed to `invitee`.
	pub invite: InviteRecord,
	pub invitee: TestUser,
}

#[derive(Clone)]
pub struct Fixtures {
	pub org_a: OrgFixture,
	pub org_b: OrgFixture,
	/// Registered, but a member of no organization.
	pub loner: TestUser,
}

pub struct TestApp {
	pub router: Router,
	pub fixtures: Fixtures,
	pub state: AppState,
}

impl TestApp {
	pub async fn new() -> Self {
		Self::with_auth(AuthConfig::default()).await
	}

	pub async fn with_auth(auth: AuthConfig) -> Self {
		let store = Arc::new(MemoryStore::new());
		let state = create_app_state(store, auth);
		let fixtures = create_fixtures(&state).await;
		let router = create_router(state.clone());

		Self {
			router,
			fixtures,
			state,
		}
	}

	pub async fn get(&self, path: &str, user: Option<&TestUser>) -> Response<Body> {
		self
			.request(Method::GET, path, user, Option::<()>::None)
			.await
	}

	pub async fn post(
		&self,
		path: &str,
		user: Option<&TestUser>,
		body: impl Serialize,
	) -> Response<Body> {
		self.request(Method::POST, path, user, Some(body)).await
	}

	pub async fn put(
		&self,
		path: &str,
		user: Option<&TestUser>,
		body: impl Serialize,
	) -> Response<Body> {
		self.request(Method::PUT, path, user, Some(body)).await
	}

	pub async fn patch(
		&self,
		path: &str,
		user: Option<&TestUser>,
		body: impl Serialize,
	) -> Response<Body> {
		self.request(Method::PATCH, path, user, Some(body)).await
	}

	pub async fn delete(&self, path: &str, user: Option<&TestUser>) -> Response<Body> {
		self
			.request(Method::DELETE, path, user, Option::<()>::None)
			.await
	}

	async fn request<T: Serialize>(
		&self,
		method: Method,
		path: &str,
		user: Option<&TestUser>,
		body: Option<T>,
	) -> Response<Body> {
		let mut builder = Request::builder().method(method).uri(path);

		if let Some(test_user) = user {
			let (name, value) = test_user.auth_header();
			builder = builder.header(name, value);
		}

		let request_body = match body {
			Some(b) => {
				builder = builder.header("content-type", "application/json");
				Body::from(serde_json::to_string(&b).unwrap())
			}
			None => Body::empty(),
		};

		let request = builder.body(request_body).unwrap();

		self.router.clone().oneshot(request).await.unwrap()
	}
}

/// Reads a JSON response body.
pub async fn json_body<T: DeserializeOwned>(response: Response<Body>) -> T {
	let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	serde_json::from_slice(&bytes).unwrap()
}

pub struct AuthzCase {
	pub name: &'static str,
	pub method: Method,
	pub path: String,
	pub user: Option<TestUser>,
	pub body: Option<serde_json::Value>,
	pub expected_status: StatusCode,
}

pub async fn run_authz_cases(app: &TestApp, cases: &[AuthzCase]) {
	for case in cases {
		let response = match (&case.method, &case.body) {
			(m, Some(body)) if *m == Method::POST => {
				app.post(&case.path, case.user.as_ref(), body.clone()).await
			}
			(m, Some(body)) if *m == Method::PUT => {
				app.put(&case.path, case.user.as_ref(), body.clone()).await
			}
			(m, Some(body)) if *m == Method::PATCH => {
				app
					.patch(&case.path, case.user.as_ref(), body.clone())
					.await
			}
			(m, None) if *m == Method::POST => {
				app
					.request(Method::POST, &case.path, case.user.as_ref(), Option::<()>::None)
					.await
			}
			(m, _) if *m == Method::DELETE => app.delete(&case.path, case.user.as_ref()).await,
			_ => app.get(&case.path, case.user.as_ref()).await,
		};

		if response.status() != case.expected_status {
			let (parts, body) = response.into_parts();
			let body_bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
			let body_str = String::from_utf8_lossy(&body_bytes);
			panic!(
				"Case '{}': {} {} - expected {}, got {}\nResponse body: {}",
				case.name, case.method, case.path, case.expected_status, parts.status, body_str
			);
		}
	}
}

async fn create_fixtures(state: &AppState) -> Fixtures {
	let org_a = create_org_fixture(state, "org-a", "Organization A").await;
	let org_b = create_org_fixture(state, "org-b", "Organization B").await;
	let loner = create_test_user(state, "loner@elsewhere.test", "Loner").await;

	Fixtures {
		org_a,
		org_b,
		loner,
	}
}

async fn create_org_fixture(state: &AppState, slug: &str, name: &str) -> OrgFixture {
	let owner = create_test_user(state, &format!("owner@{slug}.test"), "Owner User").await;
	let member = create_test_user(state, &format!("member@{slug}.test"), "Member User").await;
	let billing = create_test_user(state, &format!("billing@{slug}.test"), "Billing User").await;
	let invitee = create_test_user(state, &format!("invitee@{slug}.test"), "Invitee").await;

	let store = &state.store;
	let org = store
		.create_organization(NewOrganization {
			name: name.to_string(),
			slug: slug.to_string(),
			domain: Some(format!("{slug}.test")),
			should_attach_users_by_domain: false,
			owner_id: owner.id().clone(),
		})
		.await
		.unwrap();

	store
		.add_member(&org.id, member.id(), Role::Member)
		.await
		.unwrap();
	store
		.add_member(&org.id, billing.id(), Role::Billing)
		.await
		.unwrap();

	let member_project = store
		.create_project(NewProject {
			name: "Member Project".to_string(),
			slug: "member-project".to_string(),
			description: "Owned by a regular member".to_string(),
			organization_id: org.id.clone(),
			owner_id: member.id().clone(),
		})
		.await
		.unwrap();
	let owner_project = store
		.create_project(NewProject {
			name: "Owner Project".to_string(),
			slug: "owner-project".to_string(),
			description: "Owned by the organization owner".to_string(),
			organization_id: org.id.clone(),
			owner_id: owner.id().clone(),
		})
		.await
		.unwrap();

	let invite = store
		.create_invite(NewInvite {
			email: invitee.user.email.clone(),
			role: Role::Member,
			author_id: owner.id().clone(),
			organization_id: org.id.clone(),
		})
		.await
		.unwrap();

	OrgFixture {
		org,
		owner,
		member,
		billing,
		member_project,
		owner_project,
		invite,
		invitee,
	}
}

pub async fn create_test_user(state: &AppState, email: &str, name: &str) -> TestUser {
	let user = state
		.store
		.insert_user(UserRecord {
			id: UserId::generate(),
			name: Some(name.to_string()),
			email: email.to_string(),
			avatar_url: None,
		})
		.await
		.unwrap();

	TestUser { user }
}
