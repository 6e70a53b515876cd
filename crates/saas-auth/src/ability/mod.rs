// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Rule-based ability engine.
//!
//! An [`Ability`] is an ordered list of allow/deny rules built for one user.
//! Rules name an action and a subject kind and may carry a [`Condition`] that
//! is evaluated against concrete subject instances.
//!
//! # Architecture
//!
//! 1. **Rules** ([`rule`]): effects, conditions and per-rule matching
//! 2. **Builder** ([`builder`]): append-only accumulation, sealed by `build`
//! 3. **Engine** ([`engine`]): conflict resolution over the sealed rules
//!
//! # Evaluation Flow
//!
//! ```text
//! can(action, subject)
//!     │
//!     ├── Resolve subject kind
//!     │       ├── typed subject  → exhaustive match on the model
//!     │       └── JSON subject   → SubjectTypeDetector + schema check
//!     │
//!     ├── Walk rules newest → oldest
//!     │       ├── action matches (or rule action is manage)
//!     │       ├── kind matches   (or rule kind is all)
//!     │       └── condition holds (type-tag subjects: allow rules only)
//!     │
//!     └── First match decides; no match → deny
//! ```
//!
//! # Example
//!
//! ```
//! use saas_auth::{
//!     Condition, Project, ProjectAction, Role, RuleBuilder, Subject, TypenameDetector, User,
//! };
//!
//! let mut builder = RuleBuilder::new(User::new("u1", Role::Member));
//! builder
//!     .allow(ProjectAction::Get)
//!     .deny(ProjectAction::Delete)
//!     .allow_when(ProjectAction::Delete, Condition::owned_by_user());
//! let ability = builder.build(TypenameDetector);
//!
//! let own = Project::new("p1", "u1");
//! let other = Project::new("p2", "u2");
//!
//! assert!(ability.can(ProjectAction::Get, Subject::Type).unwrap());
//! assert!(ability.can(ProjectAction::Delete, Subject::Instance(&own)).unwrap());
//! assert!(ability.cannot(ProjectAction::Delete, Subject::Instance(&other)).unwrap());
//! ```

pub mod builder;
pub mod engine;
pub mod rule;

pub use builder::RuleBuilder;
pub use engine::Ability;
pub use rule::{Condition, Effect, Rule};
