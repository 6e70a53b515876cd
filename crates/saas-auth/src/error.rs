// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ability engine error types.

use thiserror::Error;

use crate::subjects::{Action, SubjectKind};

/// Errors that can occur while building or evaluating an [`crate::Ability`].
///
/// None of these are retried: the engine is synchronous and pure, so every
/// error propagates to the immediate caller.
#[derive(Debug, Error)]
pub enum AbilityError {
	/// The role has no entry in the role table.
	///
	/// Only reachable when a role is decoded from untrusted input; typed
	/// [`crate::Role`] values always have rules.
	#[error("permissions for role {0} not found")]
	RoleNotFound(String),

	/// The action/subject pairing is not part of the subject schema.
	#[error(transparent)]
	Schema(#[from] SchemaError),

	/// The kind of an instance subject could not be determined.
	#[error(transparent)]
	Detection(#[from] DetectionError),

	/// A rule condition failed while being evaluated.
	#[error(transparent)]
	Condition(#[from] ConditionError),
}

impl AbilityError {
	/// Returns true if this error indicates a deployment or programming defect
	/// rather than bad input.
	pub fn is_internal(&self) -> bool {
		matches!(
			self,
			AbilityError::RoleNotFound(_) | AbilityError::Condition(_)
		)
	}

	/// Returns the HTTP status code for this error.
	pub fn status_code(&self) -> u16 {
		match self {
			AbilityError::Schema(_) | AbilityError::Detection(_) => 400,
			AbilityError::RoleNotFound(_) | AbilityError::Condition(_) => 500,
		}
	}
}

/// Rejections of an `(action, subject)` candidate by the subject schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
	#[error("expected an [action, subject] pair")]
	NotAPair,

	#[error("unknown action '{0}'")]
	UnknownAction(String),

	#[error("unknown subject '{0}'")]
	UnknownSubject(String),

	#[error("action '{action}' is not defined for subject '{subject}'")]
	IllegalAction {
		action: Action,
		subject: SubjectKind,
	},

	#[error("malformed {subject} instance: {message}")]
	MalformedInstance {
		subject: SubjectKind,
		message: String,
	},
}

/// Failures to determine the kind of an instance subject.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetectionError {
	#[error("subject is not an object")]
	NotAnObject,

	#[error("subject has no '{0}' discriminant")]
	MissingDiscriminant(&'static str),

	#[error("subject discriminant '{0}' is not a string")]
	InvalidDiscriminant(&'static str),

	#[error("unknown subject type '{0}'")]
	UnknownType(String),
}

/// A rule condition could not be evaluated against the subject.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConditionError {
	#[error("condition '{condition}' needs an owner attribute, which {subject} does not have")]
	MissingAttribute {
		condition: &'static str,
		subject: SubjectKind,
	},

	#[error("condition '{condition}' failed: {message}")]
	Failed {
		condition: &'static str,
		message: String,
	},
}
