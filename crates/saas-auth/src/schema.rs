// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Runtime validation of `(action, subject)` candidates.
//!
//! Typed callers cannot build an illegal pairing; this module is the fallback
//! for pairs that arrive as data. A candidate is accepted only if it belongs
//! to one of the five per-kind schemas or is the universal `["manage", "all"]`.

use serde::Serialize;
use serde_json::Value;

use crate::detect::{SubjectTypeDetector, TypenameDetector};
use crate::error::{AbilityError, SchemaError};
use crate::subjects::{Action, SubjectInstance, SubjectKind, Target};

/// The subject half of a validated pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParsedSubject {
	Kind(SubjectKind),
	Instance(SubjectInstance),
}

impl ParsedSubject {
	pub fn kind(&self) -> SubjectKind {
		match self {
			ParsedSubject::Kind(kind) => *kind,
			ParsedSubject::Instance(instance) => instance.kind(),
		}
	}

	pub(crate) fn target(&self) -> Target<'_> {
		match self {
			ParsedSubject::Kind(kind) => Target::Kind(*kind),
			ParsedSubject::Instance(instance) => Target::Instance(instance.instance_ref()),
		}
	}
}

/// A pairing known to be present in the subject schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectPair {
	pub action: Action,
	pub subject: ParsedSubject,
}

/// Validates a JSON `[action, subject]` tuple using `__typename` detection.
pub fn parse_subject_pair(candidate: &Value) -> Result<SubjectPair, AbilityError> {
	parse_subject_pair_with(&TypenameDetector, candidate)
}

/// Validates a JSON `[action, subject]` tuple with a custom detector.
pub fn parse_subject_pair_with(
	detector: &dyn SubjectTypeDetector,
	candidate: &Value,
) -> Result<SubjectPair, AbilityError> {
	let (action, subject) = match candidate.as_array().map(Vec::as_slice) {
		Some([action, subject]) => (action, subject),
		_ => return Err(SchemaError::NotAPair.into()),
	};
	let action = action.as_str().ok_or(SchemaError::NotAPair)?;
	parse_parts(detector, action, subject)
}

/// Validates an action name and a subject value (a kind literal or an
/// instance object).
pub fn parse_parts(
	detector: &dyn SubjectTypeDetector,
	action: &str,
	subject: &Value,
) -> Result<SubjectPair, AbilityError> {
	let action: Action = action.parse()?;

	let subject = match subject {
		Value::String(literal) => ParsedSubject::Kind(literal.parse()?),
		_ => {
			let kind = detector.detect(subject)?;
			ParsedSubject::Instance(SubjectInstance::from_value(kind, subject)?)
		}
	};

	subject.kind().check_action(action)?;

	Ok(SubjectPair { action, subject })
}
