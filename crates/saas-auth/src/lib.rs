// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Role-based ability engine for the SaaS workspace.
//!
//! This crate provides:
//! - The subject schema: five authorizable kinds and their closed action sets
//! - An append-only rule builder sealed into an immutable [`Ability`]
//! - Last-match-wins evaluation with instance-level conditions
//! - The role table mapping each [`Role`] to its rules
//! - Runtime validation and subject-type detection for JSON input
//!
//! # Design
//!
//! The engine is synchronous and free of I/O. Everything a condition needs
//! (an owner id, for instance) must already be on the subject passed in.
//! An [`Ability`] is built once per request from the caller's current role
//! and discarded afterwards; it is never mutated after construction, so it can
//! be evaluated from several tasks at once.
//!
//! ```
//! use saas_auth::{get_user_permissions, BillingAction, Project, ProjectAction, Role, Subject};
//!
//! let ability = get_user_permissions("u1", Role::Member);
//! let project = Project::new("p1", "u1");
//!
//! assert!(ability.can(ProjectAction::Update, Subject::Instance(&project)).unwrap());
//! assert!(ability.cannot(BillingAction::Get, Subject::Type).unwrap());
//! ```

pub mod ability;
pub mod detect;
pub mod error;
pub mod permissions;
pub mod schema;
pub mod subjects;
pub mod types;

pub use ability::{Ability, Condition, Effect, Rule, RuleBuilder};
pub use detect::{SubjectTypeDetector, TypenameDetector};
pub use error::{AbilityError, ConditionError, DetectionError, SchemaError};
pub use permissions::{
	define_ability_for, define_ability_for_claims, get_user_permissions, permissions_for, RoleRules,
};
pub use schema::{parse_subject_pair, parse_subject_pair_with, ParsedSubject, SubjectPair};
pub use subjects::{
	Action, All, AllAction, Billing, BillingAction, InstanceRef, Invite, InviteAction,
	Organization, OrganizationAction, Project, ProjectAction, Subject, SubjectAction,
	SubjectInstance, SubjectKind, SubjectModel, Target, User, UserAction, TYPENAME_FIELD,
};
pub use types::*;
