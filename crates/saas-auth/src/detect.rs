// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Subject-type detection for dynamically decoded subjects.
//!
//! Typed subjects never need detection: their kind is a pattern match on
//! [`crate::subjects::InstanceRef`]. Detection only happens at the
//! deserialization boundary, when a subject arrives as JSON (an API payload,
//! a UI form) and must be mapped to one of the five kinds before its shape can
//! be validated.
//!
//! The detector is pluggable so that the subject schema does not depend on one
//! data-modeling convention. [`TypenameDetector`] implements the standard
//! `__typename` discriminant.

use serde_json::Value;

use crate::error::DetectionError;
use crate::subjects::{SubjectKind, TYPENAME_FIELD};

/// Maps a JSON subject instance to its kind.
pub trait SubjectTypeDetector: Send + Sync {
	fn detect(&self, subject: &Value) -> Result<SubjectKind, DetectionError>;
}

impl<F> SubjectTypeDetector for F
where
	F: Fn(&Value) -> Result<SubjectKind, DetectionError> + Send + Sync,
{
	fn detect(&self, subject: &Value) -> Result<SubjectKind, DetectionError> {
		self(subject)
	}
}

/// Reads the kind from the `__typename` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypenameDetector;

impl SubjectTypeDetector for TypenameDetector {
	fn detect(&self, subject: &Value) -> Result<SubjectKind, DetectionError> {
		let object = subject.as_object().ok_or(DetectionError::NotAnObject)?;
		let typename = object
			.get(TYPENAME_FIELD)
			.ok_or(DetectionError::MissingDiscriminant(TYPENAME_FIELD))?
			.as_str()
			.ok_or(DetectionError::InvalidDiscriminant(TYPENAME_FIELD))?;

		match typename.parse::<SubjectKind>() {
			Ok(SubjectKind::All) | Err(_) => Err(DetectionError::UnknownType(typename.to_string())),
			Ok(kind) => Ok(kind),
		}
	}
}
