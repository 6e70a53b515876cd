// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Append-only rule accumulation.

use std::sync::Arc;

use super::engine::Ability;
use super::rule::{Condition, Effect, Rule};
use crate::detect::SubjectTypeDetector;
use crate::subjects::{SubjectAction, SubjectModel, User};

/// Collects rules for one user in registration order.
///
/// Registration order is significant: when several rules match a check, the
/// one registered last decides. A role function typically registers broad
/// grants first and narrower overrides after them.
///
/// [`RuleBuilder::build`] consumes the builder, so a sealed rule set can
/// never be appended to:
///
/// ```compile_fail
/// use saas_auth::{ProjectAction, Role, RuleBuilder, TypenameDetector, User};
///
/// let mut builder = RuleBuilder::new(User::new("u1", Role::Member));
/// let ability = builder.build(TypenameDetector);
/// builder.allow(ProjectAction::Get);
/// ```
#[derive(Debug)]
pub struct RuleBuilder {
	user: User,
	rules: Vec<Rule>,
}

impl RuleBuilder {
	pub fn new(user: User) -> Self {
		Self {
			user,
			rules: Vec::new(),
		}
	}

	/// The user the rules are being built for.
	pub fn user(&self) -> &User {
		&self.user
	}

	/// Rules registered so far, in registration order.
	pub fn rules(&self) -> &[Rule] {
		&self.rules
	}

	pub fn allow<A: SubjectAction>(&mut self, action: A) -> &mut Self {
		self.push::<A>(Effect::Allow, action, None)
	}

	pub fn allow_when<A: SubjectAction>(&mut self, action: A, condition: Condition) -> &mut Self {
		self.push::<A>(Effect::Allow, action, Some(condition))
	}

	pub fn deny<A: SubjectAction>(&mut self, action: A) -> &mut Self {
		self.push::<A>(Effect::Deny, action, None)
	}

	pub fn deny_when<A: SubjectAction>(&mut self, action: A, condition: Condition) -> &mut Self {
		self.push::<A>(Effect::Deny, action, Some(condition))
	}

	fn push<A: SubjectAction>(
		&mut self,
		effect: Effect,
		action: A,
		condition: Option<Condition>,
	) -> &mut Self {
		self.rules.push(Rule {
			effect,
			action: action.into(),
			subject: <A::Subject as SubjectModel>::KIND,
			condition,
		});
		self
	}

	/// Seals the rules and binds the detector used for dynamically decoded
	/// instance subjects.
	pub fn build(self, detector: impl SubjectTypeDetector + 'static) -> Ability {
		Ability::new(self.user, self.rules, Arc::new(detector))
	}
}
