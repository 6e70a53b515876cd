// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP route handlers.

pub mod billing;
pub mod health;
pub mod invites;
pub mod organizations;
pub mod projects;
pub mod users;
