// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Billing summary handler.

use axum::{
	extract::{Path, State},
	Json,
};
use saas_auth::{BillingAction, Role};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::api::AppState;
use crate::auth_middleware::RequireAuth;
use crate::authorize;
use crate::authz::get_user_membership;
use crate::error::ServerError;

/// Monthly price of one seat.
pub const SEAT_PRICE: u64 = 10;
/// Monthly price of one project.
pub const PROJECT_PRICE: u64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
	pub amount: u64,
	pub unit: u64,
	pub price: u64,
}

impl LineItem {
	fn new(amount: u64, unit: u64) -> Self {
		Self {
			amount,
			unit,
			price: amount * unit,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Billing {
	pub seats: LineItem,
	pub projects: LineItem,
	pub total: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BillingResponse {
	pub billing: Billing,
}

/// GET /organizations/{slug}/billing - Seat and project charges.
///
/// Billing-only members are not charged a seat.
#[instrument(skip(state, current_user), fields(actor_id = %current_user.id))]
pub async fn get_billing(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(slug): Path<String>,
) -> Result<Json<BillingResponse>, ServerError> {
	let membership = get_user_membership(&state, &slug, &current_user.id).await?;
	let billing = membership.organization.billing_subject();
	authorize!(&membership.ability, BillingAction::Get, (&billing).into())?;

	let org_id = &membership.organization.id;
	let seats = state
		.store
		.members(org_id)
		.await
		.iter()
		.filter(|m| m.role != Role::Billing)
		.count() as u64;
	let projects = state.store.projects(org_id).await.len() as u64;

	let seats = LineItem::new(seats, SEAT_PRICE);
	let projects = LineItem::new(projects, PROJECT_PRICE);
	Ok(Json(BillingResponse {
		billing: Billing {
			seats,
			projects,
			total: seats.price + projects.price,
		},
	}))
}
