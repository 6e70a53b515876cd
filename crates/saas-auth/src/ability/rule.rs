// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Rules and their instance-level conditions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::error::ConditionError;
use crate::subjects::{Action, InstanceRef, SubjectKind, Target, User};

/// The outcome a rule asserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
	Allow,
	Deny,
}

type Predicate = dyn Fn(&User, InstanceRef<'_>) -> Result<bool, ConditionError> + Send + Sync;

/// A named predicate over `(acting user, subject instance)`.
///
/// Predicates may fail; a failure aborts the evaluation and reaches the
/// caller of [`crate::Ability::can`] unchanged.
#[derive(Clone)]
pub struct Condition {
	name: &'static str,
	predicate: Arc<Predicate>,
}

impl Condition {
	pub fn new<F>(name: &'static str, predicate: F) -> Self
	where
		F: Fn(&User, InstanceRef<'_>) -> Result<bool, ConditionError> + Send + Sync + 'static,
	{
		Self {
			name,
			predicate: Arc::new(predicate),
		}
	}

	/// `instance.ownerId == user.id`.
	///
	/// Fails on kinds that have no owner attribute; an owner attribute that is
	/// empty (an invite whose author was deleted) simply does not match.
	pub fn owned_by_user() -> Self {
		const NAME: &str = "owned_by_user";
		Self::new(NAME, |user, instance| {
			if !instance.has_owner_attribute() {
				return Err(ConditionError::MissingAttribute {
					condition: NAME,
					subject: instance.kind(),
				});
			}
			Ok(instance.owner_id() == Some(&user.id))
		})
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	pub fn evaluate(&self, user: &User, instance: InstanceRef<'_>) -> Result<bool, ConditionError> {
		(self.predicate)(user, instance)
	}
}

impl fmt::Debug for Condition {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Condition").field(&self.name).finish()
	}
}

/// One `(effect, action, subject kind, condition?)` entry of a rule set.
#[derive(Debug, Clone)]
pub struct Rule {
	pub effect: Effect,
	pub action: Action,
	pub subject: SubjectKind,
	pub condition: Option<Condition>,
}

impl Rule {
	/// `manage` matches every action.
	pub fn matches_action(&self, action: Action) -> bool {
		self.action == action || self.action == Action::Manage
	}

	/// `all` matches every kind.
	pub fn matches_kind(&self, kind: SubjectKind) -> bool {
		self.subject == kind || self.subject == SubjectKind::All
	}

	/// Evaluates the condition against the subject.
	///
	/// A type-tag subject has no attributes to test. A conditional allow
	/// still matches it ("the user can update *some* project"), a
	/// conditional deny does not.
	pub fn matches_conditions(&self, user: &User, target: Target<'_>) -> Result<bool, ConditionError> {
		let Some(condition) = &self.condition else {
			return Ok(true);
		};

		match target {
			Target::Kind(_) => Ok(self.effect == Effect::Allow),
			Target::Instance(instance) => condition.evaluate(user, instance),
		}
	}

	pub fn is_conditional(&self) -> bool {
		self.condition.is_some()
	}
}
