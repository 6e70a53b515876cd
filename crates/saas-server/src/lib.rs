// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SaaS API server.
//!
//! This crate provides the HTTP boundary over organizations, projects,
//! invites and billing. Each request builds a fresh ability for the caller's
//! role in the addressed organization and denies with `403` when the ability
//! engine says no.

pub mod api;
pub mod auth_middleware;
pub mod authz;
pub mod error;
pub mod routes;
pub mod store;
pub mod validation;

pub use api::{create_app_state, create_router, AppState};
pub use error::ServerError;
pub use saas_server_config::ServerConfig;
pub use store::{MemoryStore, Store};
