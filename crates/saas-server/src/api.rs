// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Application state and router construction.

use std::sync::Arc;

use axum::{
	routing::{delete, get, patch, post, put},
	Router,
};
use saas_server_config::AuthConfig;
use tower_http::trace::TraceLayer;

use crate::routes;
use crate::store::Store;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
	pub store: Arc<dyn Store>,
	pub auth: AuthConfig,
}

/// Builds the state shared by all handlers.
pub fn create_app_state(store: Arc<dyn Store>, auth: AuthConfig) -> AppState {
	AppState { store, auth }
}

/// Creates the application router.
///
/// Every route except `POST /users`, `GET /invites/{invite_id}` and
/// `GET /health` requires the identity header. Organization-scoped routes
/// also resolve the caller's membership and gate the operation with the
/// ability engine.
pub fn create_router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(routes::health::health_check))
		.route("/users", post(routes::users::create_account))
		.route("/profile", get(routes::users::get_profile))
		.route(
			"/organizations",
			post(routes::organizations::create_organization),
		)
		.route(
			"/organizations/{slug}",
			put(routes::organizations::update_organization)
				.delete(routes::organizations::delete_organization),
		)
		.route(
			"/organizations/{slug}/membership",
			get(routes::organizations::get_membership),
		)
		.route(
			"/organizations/{slug}/permissions",
			get(routes::organizations::get_permissions),
		)
		.route(
			"/organizations/{slug}/owner",
			patch(routes::organizations::transfer_ownership),
		)
		.route(
			"/organizations/{slug}/projects",
			get(routes::projects::get_projects).post(routes::projects::create_project),
		)
		// GET addresses a project by slug, PUT and DELETE by id.
		.route(
			"/organizations/{slug}/projects/{project}",
			get(routes::projects::get_project)
				.put(routes::projects::update_project)
				.delete(routes::projects::delete_project),
		)
		.route(
			"/organizations/{slug}/invites",
			post(routes::invites::create_invite),
		)
		.route(
			"/organizations/{slug}/invites/{invite_id}",
			delete(routes::invites::revoke_invite),
		)
		.route("/invites/{invite_id}", get(routes::invites::get_invite))
		.route(
			"/invites/{invite_id}/accept",
			post(routes::invites::accept_invite),
		)
		.route(
			"/organizations/{slug}/billing",
			get(routes::billing::get_billing),
		)
		.layer(TraceLayer::new_for_http())
		.with_state(state)
}
