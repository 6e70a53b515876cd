// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Subject schema: which actions exist for which kinds of subject.
//!
//! Every authorizable entity is one of five kinds ([`SubjectKind`]), each with
//! its own closed action set:
//!
//! | Kind           | Actions                                          |
//! |----------------|--------------------------------------------------|
//! | `User`         | manage, get, update, delete                      |
//! | `Project`      | manage, get, create, update, delete              |
//! | `Organization` | manage, update, delete, transfer_ownership       |
//! | `Invite`       | manage, create, get, update, delete              |
//! | `Billing`      | manage, get, export                              |
//! | `all`          | manage                                           |
//!
//! Each kind has a dedicated action enum ([`ProjectAction`], ...) whose
//! [`SubjectAction::Subject`] ties it to the kind's model type. Calling
//! [`crate::Ability::can`] with an action that does not belong to the
//! subject is therefore a type error, not a runtime check. The runtime check
//! in [`crate::schema`] exists only for dynamically decoded input.
//!
//! A subject is passed either as a bare type tag ([`Subject::Type`], "can the
//! user create any project") or as a concrete record ([`Subject::Instance`]).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SchemaError;
use crate::types::UserId;

/// Defines a per-kind action enum bound to its subject model.
macro_rules! define_subject_actions {
	(
		$(#[$meta:meta])*
		$name:ident for $subject:ty { $($variant:ident),+ $(,)? }
	) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
		#[serde(rename_all = "snake_case")]
		pub enum $name {
			$($variant),+
		}

		impl $name {
			/// Returns every action defined for this subject kind.
			pub fn all() -> &'static [$name] {
				&[$($name::$variant),+]
			}
		}

		impl From<$name> for $crate::subjects::Action {
			fn from(action: $name) -> Self {
				match action {
					$($name::$variant => $crate::subjects::Action::$variant),+
				}
			}
		}

		impl $crate::subjects::SubjectAction for $name {
			type Subject = $subject;
		}
	};
}

mod billing;
mod invite;
mod organization;
mod project;
mod user;

pub use billing::{Billing, BillingAction};
pub use invite::{Invite, InviteAction};
pub use organization::{Organization, OrganizationAction};
pub use project::{Project, ProjectAction};
pub use user::{User, UserAction};

/// Field carrying the subject kind on serialized instances.
pub const TYPENAME_FIELD: &str = "__typename";

// =============================================================================
// Action and kind vocabularies
// =============================================================================

/// Every action known to the schema, regardless of subject kind.
///
/// `Manage` is a wildcard: a rule registered for `Manage` matches any
/// requested action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
	Manage,
	Get,
	Create,
	Update,
	Delete,
	TransferOwnership,
	Export,
}

impl Action {
	pub fn as_str(&self) -> &'static str {
		match self {
			Action::Manage => "manage",
			Action::Get => "get",
			Action::Create => "create",
			Action::Update => "update",
			Action::Delete => "delete",
			Action::TransferOwnership => "transfer_ownership",
			Action::Export => "export",
		}
	}
}

impl fmt::Display for Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Action {
	type Err = SchemaError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"manage" => Ok(Action::Manage),
			"get" => Ok(Action::Get),
			"create" => Ok(Action::Create),
			"update" => Ok(Action::Update),
			"delete" => Ok(Action::Delete),
			"transfer_ownership" => Ok(Action::TransferOwnership),
			"export" => Ok(Action::Export),
			other => Err(SchemaError::UnknownAction(other.to_string())),
		}
	}
}

/// The five authorizable subject kinds plus the `all` wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubjectKind {
	User,
	Project,
	Organization,
	Invite,
	Billing,
	#[serde(rename = "all")]
	All,
}

impl SubjectKind {
	/// Returns the five concrete kinds (everything except the wildcard).
	pub fn concrete() -> &'static [SubjectKind] {
		&[
			SubjectKind::User,
			SubjectKind::Project,
			SubjectKind::Organization,
			SubjectKind::Invite,
			SubjectKind::Billing,
		]
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			SubjectKind::User => "User",
			SubjectKind::Project => "Project",
			SubjectKind::Organization => "Organization",
			SubjectKind::Invite => "Invite",
			SubjectKind::Billing => "Billing",
			SubjectKind::All => "all",
		}
	}

	/// Returns the closed action set for this kind.
	pub fn legal_actions(&self) -> &'static [Action] {
		use Action::*;
		match self {
			SubjectKind::User => &[Manage, Get, Update, Delete],
			SubjectKind::Project => &[Manage, Get, Create, Update, Delete],
			SubjectKind::Organization => &[Manage, Update, Delete, TransferOwnership],
			SubjectKind::Invite => &[Manage, Create, Get, Update, Delete],
			SubjectKind::Billing => &[Manage, Get, Export],
			SubjectKind::All => &[Manage],
		}
	}

	/// Returns true if `(action, self)` is a pairing present in the schema.
	pub fn allows_action(&self, action: Action) -> bool {
		self.legal_actions().contains(&action)
	}

	/// Validates an `(action, kind)` pairing.
	pub fn check_action(&self, action: Action) -> Result<(), SchemaError> {
		if self.allows_action(action) {
			Ok(())
		} else {
			Err(SchemaError::IllegalAction {
				action,
				subject: *self,
			})
		}
	}
}

impl fmt::Display for SubjectKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for SubjectKind {
	type Err = SchemaError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"User" => Ok(SubjectKind::User),
			"Project" => Ok(SubjectKind::Project),
			"Organization" => Ok(SubjectKind::Organization),
			"Invite" => Ok(SubjectKind::Invite),
			"Billing" => Ok(SubjectKind::Billing),
			"all" => Ok(SubjectKind::All),
			other => Err(SchemaError::UnknownSubject(other.to_string())),
		}
	}
}

// =============================================================================
// Typed pairing
// =============================================================================

/// A model type that can be the subject of an authorization check.
pub trait SubjectModel: fmt::Debug {
	/// The kind every value of this type belongs to.
	const KIND: SubjectKind;

	/// Borrows this value as a kind-erased instance for condition evaluation.
	fn instance_ref(&self) -> InstanceRef<'_>;
}

/// A per-kind action, statically tied to the subject model it applies to.
pub trait SubjectAction: Copy + fmt::Debug + Into<Action> {
	type Subject: SubjectModel;
}

/// The wildcard subject.
///
/// It has no values, so it can only be referred to as [`Subject::Type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum All {}

impl SubjectModel for All {
	const KIND: SubjectKind = SubjectKind::All;

	fn instance_ref(&self) -> InstanceRef<'_> {
		match *self {}
	}
}

define_subject_actions! {
	/// Actions on the `all` wildcard.
	AllAction for All { Manage }
}

/// The subject argument of an authorization check.
#[derive(Debug)]
pub enum Subject<'a, T> {
	/// The bare kind, e.g. "any Project".
	Type,
	/// A concrete record.
	Instance(&'a T),
}

impl<T> Clone for Subject<'_, T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T> Copy for Subject<'_, T> {}

impl<'a, T> From<&'a T> for Subject<'a, T> {
	fn from(instance: &'a T) -> Self {
		Subject::Instance(instance)
	}
}

impl<'a, T: SubjectModel> Subject<'a, T> {
	pub(crate) fn target(self) -> Target<'a> {
		match self {
			Subject::Type => Target::Kind(T::KIND),
			Subject::Instance(instance) => Target::Instance(instance.instance_ref()),
		}
	}
}

/// A kind-erased subject as seen by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
	Kind(SubjectKind),
	Instance(InstanceRef<'a>),
}

impl Target<'_> {
	/// Resolves the subject kind. For instances this is the subject-type
	/// detection step, done by exhaustive match.
	pub fn kind(&self) -> SubjectKind {
		match self {
			Target::Kind(kind) => *kind,
			Target::Instance(instance) => instance.kind(),
		}
	}
}

// =============================================================================
// Instances
// =============================================================================

/// A borrowed instance of one of the five subject kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceRef<'a> {
	User(&'a User),
	Project(&'a Project),
	Organization(&'a Organization),
	Invite(&'a Invite),
	Billing(&'a Billing),
}

impl<'a> InstanceRef<'a> {
	pub fn kind(&self) -> SubjectKind {
		match self {
			InstanceRef::User(_) => SubjectKind::User,
			InstanceRef::Project(_) => SubjectKind::Project,
			InstanceRef::Organization(_) => SubjectKind::Organization,
			InstanceRef::Invite(_) => SubjectKind::Invite,
			InstanceRef::Billing(_) => SubjectKind::Billing,
		}
	}

	/// Returns true if instances of this kind carry an owner attribute.
	pub fn has_owner_attribute(&self) -> bool {
		!matches!(self, InstanceRef::Billing(_))
	}

	/// The user owning this instance, used by ownership conditions.
	///
	/// Users own themselves; invites are owned by their author, who may have
	/// been deleted.
	pub fn owner_id(&self) -> Option<&'a UserId> {
		match self {
			InstanceRef::User(user) => Some(&user.id),
			InstanceRef::Project(project) => Some(&project.owner_id),
			InstanceRef::Organization(org) => Some(&org.owner_id),
			InstanceRef::Invite(invite) => invite.author_id.as_ref(),
			InstanceRef::Billing(_) => None,
		}
	}
}

/// An owned instance, tagged with [`TYPENAME_FIELD`] when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "__typename")]
pub enum SubjectInstance {
	User(User),
	Project(Project),
	Organization(Organization),
	Invite(Invite),
	Billing(Billing),
}

impl SubjectInstance {
	pub fn kind(&self) -> SubjectKind {
		self.instance_ref().kind()
	}

	pub fn instance_ref(&self) -> InstanceRef<'_> {
		match self {
			SubjectInstance::User(user) => InstanceRef::User(user),
			SubjectInstance::Project(project) => InstanceRef::Project(project),
			SubjectInstance::Organization(org) => InstanceRef::Organization(org),
			SubjectInstance::Invite(invite) => InstanceRef::Invite(invite),
			SubjectInstance::Billing(billing) => InstanceRef::Billing(billing),
		}
	}

	/// Structurally validates `value` as an instance of `kind`.
	///
	/// The kind must already be known (see [`crate::detect`]); fields other
	/// than the kind's own, including the discriminant, are ignored.
	pub fn from_value(kind: SubjectKind, value: &serde_json::Value) -> Result<Self, SchemaError> {
		fn parse<T: serde::de::DeserializeOwned>(
			kind: SubjectKind,
			value: &serde_json::Value,
		) -> Result<T, SchemaError> {
			T::deserialize(value).map_err(|e| SchemaError::MalformedInstance {
				subject: kind,
				message: e.to_string(),
			})
		}

		match kind {
			SubjectKind::User => parse(kind, value).map(SubjectInstance::User),
			SubjectKind::Project => parse(kind, value).map(SubjectInstance::Project),
			SubjectKind::Organization => parse(kind, value).map(SubjectInstance::Organization),
			SubjectKind::Invite => parse(kind, value).map(SubjectInstance::Invite),
			SubjectKind::Billing => parse(kind, value).map(SubjectInstance::Billing),
			SubjectKind::All => Err(SchemaError::UnknownSubject(kind.to_string())),
		}
	}
}

impl From<User> for SubjectInstance {
	fn from(user: User) -> Self {
		SubjectInstance::User(user)
	}
}

impl From<Project> for SubjectInstance {
	fn from(project: Project) -> Self {
		SubjectInstance::Project(project)
	}
}

impl From<Organization> for SubjectInstance {
	fn from(org: Organization) -> Self {
		SubjectInstance::Organization(org)
	}
}

impl From<Invite> for SubjectInstance {
	fn from(invite: Invite) -> Self {
		SubjectInstance::Invite(invite)
	}
}

impl From<Billing> for SubjectInstance {
	fn from(billing: Billing) -> Self {
		SubjectInstance::Billing(billing)
	}
}
