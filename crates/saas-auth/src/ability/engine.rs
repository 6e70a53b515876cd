// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ability evaluation.
//!
//! A check resolves the subject kind, then walks the sealed rules from the
//! most recently registered to the oldest. The first rule whose action, kind
//! and condition all match decides; this is the same as letting the last
//! matching rule in registration order win. If nothing matches the check is
//! denied.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument};

use super::rule::{Effect, Rule};
use crate::detect::SubjectTypeDetector;
use crate::error::AbilityError;
use crate::schema::{parse_parts, SubjectPair};
use crate::subjects::{Action, Subject, SubjectAction, Target, User};

/// The sealed rule set of one user plus its evaluation functions.
///
/// Built once per authorization context (usually per request) and never
/// mutated afterwards, so it may be shared across threads freely.
#[derive(Clone)]
pub struct Ability {
	user: User,
	rules: Arc<[Rule]>,
	detector: Arc<dyn SubjectTypeDetector>,
}

impl Ability {
	pub(crate) fn new(user: User, rules: Vec<Rule>, detector: Arc<dyn SubjectTypeDetector>) -> Self {
		Self {
			user,
			rules: rules.into(),
			detector,
		}
	}

	/// The user this ability was built for.
	pub fn user(&self) -> &User {
		&self.user
	}

	/// The sealed rules, in registration order.
	pub fn rules(&self) -> &[Rule] {
		&self.rules
	}

	/// Returns true if the user may perform `action` on `subject`.
	///
	/// # Errors
	///
	/// Propagates [`AbilityError::Condition`] if a rule condition fails.
	pub fn can<A: SubjectAction>(
		&self,
		action: A,
		subject: Subject<'_, A::Subject>,
	) -> Result<bool, AbilityError> {
		self
			.decide(action.into(), subject.target())
			.map(|effect| effect == Effect::Allow)
	}

	/// Negation of [`Ability::can`].
	pub fn cannot<A: SubjectAction>(
		&self,
		action: A,
		subject: Subject<'_, A::Subject>,
	) -> Result<bool, AbilityError> {
		self.can(action, subject).map(|allowed| !allowed)
	}

	/// Checks a pair that was validated by [`crate::schema::parse_subject_pair`].
	pub fn can_pair(&self, pair: &SubjectPair) -> Result<bool, AbilityError> {
		self
			.decide(pair.action, pair.subject.target())
			.map(|effect| effect == Effect::Allow)
	}

	/// Checks an action and subject received as data.
	///
	/// `subject` is either a kind literal (`"Project"`, `"all"`) or an
	/// instance object, whose kind is resolved with the detector bound at
	/// build time.
	///
	/// # Errors
	///
	/// - [`AbilityError::Detection`] if an instance's kind cannot be determined
	/// - [`AbilityError::Schema`] if the pairing or the instance shape is invalid
	/// - [`AbilityError::Condition`] if a rule condition fails
	pub fn can_value(&self, action: &str, subject: &Value) -> Result<bool, AbilityError> {
		let pair = parse_parts(self.detector.as_ref(), action, subject)?;
		self.can_pair(&pair)
	}

	/// Negation of [`Ability::can_value`].
	pub fn cannot_value(&self, action: &str, subject: &Value) -> Result<bool, AbilityError> {
		self.can_value(action, subject).map(|allowed| !allowed)
	}

	/// Returns the rule that decides `(action, target)` and its registration
	/// index, or `None` when the check falls through to the default deny.
	pub fn relevant_rule_for(
		&self,
		action: Action,
		target: Target<'_>,
	) -> Result<Option<(usize, &Rule)>, AbilityError> {
		let kind = target.kind();

		for (index, rule) in self.rules.iter().enumerate().rev() {
			if !rule.matches_action(action) || !rule.matches_kind(kind) {
				continue;
			}
			if rule.matches_conditions(&self.user, target)? {
				return Ok(Some((index, rule)));
			}
		}

		Ok(None)
	}

	#[instrument(
		level = "debug",
		skip_all,
		fields(
			user_id = %self.user.id,
			role = %self.user.role,
			action = %action,
			subject_kind = %target.kind(),
		)
	)]
	fn decide(&self, action: Action, target: Target<'_>) -> Result<Effect, AbilityError> {
		match self.relevant_rule_for(action, target)? {
			Some((index, rule)) => {
				debug!(
					rule_index = index,
					effect = ?rule.effect,
					conditional = rule.is_conditional(),
					"ability decision"
				);
				Ok(rule.effect)
			}
			None => {
				debug!(effect = ?Effect::Deny, "ability decision: no matching rule");
				Ok(Effect::Deny)
			}
		}
	}
}

impl fmt::Debug for Ability {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Ability")
			.field("user", &self.user)
			.field("rules", &self.rules)
			.finish_non_exhaustive()
	}
}
