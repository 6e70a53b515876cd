// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared validation utilities for API handlers.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::error::ServerError;

static SLUG_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]*[a-z0-9]$|^[a-z0-9]$").unwrap());

static EMAIL_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Derive a URL slug from a display name.
///
/// Accents are folded (`é` becomes `e`), ASCII letters and digits are kept
/// lowercased, whitespace, `-` and `_` runs collapse to a single `-`, and
/// everything else is dropped.
pub fn create_slug(name: &str) -> String {
	let mut slug = String::with_capacity(name.len());
	let mut pending_dash = false;

	for c in name.trim().nfd().filter(|c| !is_combining_mark(*c)) {
		if c.is_ascii_alphanumeric() {
			if pending_dash && !slug.is_empty() {
				slug.push('-');
			}
			pending_dash = false;
			slug.push(c.to_ascii_lowercase());
		} else if c.is_whitespace() || c == '-' || c == '_' {
			pending_dash = true;
		}
	}

	slug
}

/// Validate a slug against format and length constraints.
pub fn validate_slug(slug: &str, min_len: usize, max_len: usize) -> bool {
	slug.len() >= min_len && slug.len() <= max_len && SLUG_REGEX.is_match(slug)
}

/// Sanitize an email address by trimming whitespace and lowercasing.
pub fn sanitize_email(email: &str) -> String {
	email.trim().to_lowercase()
}

pub fn validate_email(email: &str) -> Result<(), ServerError> {
	if EMAIL_REGEX.is_match(email) {
		Ok(())
	} else {
		Err(ServerError::BadRequest("Invalid email address.".to_string()))
	}
}

/// Requires a non-blank name of at most `max_len` characters.
pub fn validate_name(field: &str, value: &str, max_len: usize) -> Result<(), ServerError> {
	let trimmed = value.trim();
	if trimmed.is_empty() {
		return Err(ServerError::BadRequest(format!("{field} must not be empty.")));
	}
	if trimmed.chars().count() > max_len {
		return Err(ServerError::BadRequest(format!(
			"{field} must be at most {max_len} characters."
		)));
	}
	Ok(())
}

/// Domain part of an email address, lowercased.
pub fn email_domain(email: &str) -> Option<String> {
	email
		.rsplit_once('@')
		.map(|(_, domain)| domain.to_ascii_lowercase())
		.filter(|d| !d.is_empty())
}
