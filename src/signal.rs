//! Error payloads the host application raises for permission, validation and concurrency
//! failures.
//!
//! Downstream consumers pattern-match on the shape of these payloads, so the validation error
//! list keeps its wire form exactly: a non-empty array of arrays, each starting with a `:tag`
//! keyword followed by that error's details.

use std::error::Error as StdError;
use std::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

/// Errors from the smart constructors in this module.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum SignalError {
	#[error("invalid keyword {0:?}")]
	InvalidKeyword(String),

	#[error("Need at least one error")]
	NoErrors,
}

/// A symbolic tag such as `:missing-name`.
///
/// ```rust
/// use qisvg::signal::Keyword;
///
/// let tag = Keyword::new(":missing-name").unwrap();
/// assert_eq!(tag, Keyword::new("missing-name").unwrap());
/// assert_eq!(tag.to_string(), ":missing-name");
/// assert!(Keyword::new("not a keyword").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Keyword(String);

impl Keyword {
	/// Accepts a name with or without the leading `:`.
	pub fn new(name: impl AsRef<str>) -> Result<Self, SignalError> {
		let raw = name.as_ref();
		let name = raw.strip_prefix(':').unwrap_or(raw);
		if name.is_empty() || name.chars().any(char::is_whitespace) {
			return Err(SignalError::InvalidKeyword(raw.to_string()));
		}
		Ok(Self(name.to_string()))
	}

	/// The name without the leading `:`.
	pub fn name(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for Keyword {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, ":{}", self.0)
	}
}

impl Serialize for Keyword {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

impl<'de> Deserialize<'de> for Keyword {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let raw = String::deserialize(deserializer)?;
		Keyword::new(&raw).map_err(de::Error::custom)
	}
}

/// Something a user may be allowed to do, e.g. `[:view-territory congregation-id territory-id]`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Permit {
	pub action: Keyword,
	pub scope: Vec<Uuid>,
}

impl Permit {
	pub fn new(action: Keyword, scope: impl IntoIterator<Item = Uuid>) -> Self {
		Self {
			action,
			scope: scope.into_iter().collect(),
		}
	}
}

impl fmt::Display for Permit {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{}", self.action)?;
		for id in &self.scope {
			write!(f, " {}", id)?;
		}
		f.write_str("]")
	}
}

/// One validation failure: a tag and its details, e.g. `[:too-long "name" 100]`.
#[derive(Clone, PartialEq, Debug)]
pub struct ValidationError {
	pub tag: Keyword,
	pub details: Vec<Value>,
}

impl ValidationError {
	pub fn new(tag: Keyword) -> Self {
		Self {
			tag,
			details: Vec::new(),
		}
	}

	/// Appends a detail after the tag.
	pub fn with_detail(mut self, detail: impl Into<Value>) -> Self {
		self.details.push(detail.into());
		self
	}
}

impl fmt::Display for ValidationError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{}", self.tag)?;
		for detail in &self.details {
			write!(f, " {}", detail)?;
		}
		f.write_str("]")
	}
}

impl Serialize for ValidationError {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut seq = serializer.serialize_seq(Some(1 + self.details.len()))?;
		seq.serialize_element(&self.tag)?;
		for detail in &self.details {
			seq.serialize_element(detail)?;
		}
		seq.end()
	}
}

impl<'de> Deserialize<'de> for ValidationError {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		struct TupleVisitor;

		impl<'de> Visitor<'de> for TupleVisitor {
			type Value = ValidationError;

			fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str("a sequence which starts with a keyword")
			}

			fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
				let tag: Keyword = seq
					.next_element()?
					.ok_or_else(|| de::Error::invalid_length(0, &self))?;
				let mut details = Vec::new();
				while let Some(detail) = seq.next_element::<Value>()? {
					details.push(detail);
				}
				Ok(ValidationError { tag, details })
			}
		}

		deserializer.deserialize_seq(TupleVisitor)
	}
}

/// A non-empty, ordered list of validation failures.
///
/// ```rust
/// use qisvg::signal::{Keyword, ValidationError, ValidationErrors};
///
/// let errors = ValidationErrors::new(vec![
///     ValidationError::new(Keyword::new("missing-name").unwrap()),
///     ValidationError::new(Keyword::new("too-long").unwrap()).with_detail(100),
/// ]).unwrap();
///
/// assert_eq!(serde_json::to_string(&errors).unwrap(), r#"[[":missing-name"],[":too-long",100]]"#);
/// assert!(ValidationErrors::new(vec![]).is_err());
/// ```
#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
	pub fn new(errors: Vec<ValidationError>) -> Result<Self, SignalError> {
		if errors.is_empty() {
			return Err(SignalError::NoErrors);
		}
		Ok(Self(errors))
	}

	/// A list holding just `error`.
	pub fn single(error: ValidationError) -> Self {
		Self(vec![error])
	}

	pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
		self.0.iter()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// A `ValidationErrors` is never empty.
	pub fn is_empty(&self) -> bool {
		false
	}

	/// Returns the first error carrying `tag`.
	pub fn find(&self, tag: &Keyword) -> Option<&ValidationError> {
		self.0.iter().find(|error| &error.tag == tag)
	}

	pub fn into_vec(self) -> Vec<ValidationError> {
		self.0
	}
}

impl<'a> IntoIterator for &'a ValidationErrors {
	type Item = &'a ValidationError;
	type IntoIter = std::slice::Iter<'a, ValidationError>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

impl fmt::Display for ValidationErrors {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("[")?;
		for (i, error) in self.0.iter().enumerate() {
			if i > 0 {
				f.write_str(" ")?;
			}
			write!(f, "{}", error)?;
		}
		f.write_str("]")
	}
}

impl<'de> Deserialize<'de> for ValidationErrors {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let errors = Vec::<ValidationError>::deserialize(deserializer)?;
		ValidationErrors::new(errors).map_err(de::Error::custom)
	}
}

/// Failures the host application signals to its callers.
#[derive(Debug, Error)]
pub enum HostError {
	/// The user lacks a permit needed for the operation.
	#[error("User {user_id} does not have permit {permit}")]
	NoPermit { user_id: Uuid, permit: Permit },

	/// Input was rejected; the list says why.
	#[error("{0}")]
	Validation(ValidationErrors),

	/// A concurrent write got there first.
	#[error("{}", .message.as_deref().unwrap_or("write conflict"))]
	WriteConflict {
		message: Option<String>,
		#[source]
		source: Option<Box<dyn StdError + Send + Sync + 'static>>,
	},
}

impl HostError {
	pub fn no_permit(user_id: Uuid, permit: Permit) -> Self {
		HostError::NoPermit { user_id, permit }
	}

	pub fn validation(errors: ValidationErrors) -> Self {
		HostError::Validation(errors)
	}

	/// A write conflict with no message and no cause.
	pub fn write_conflict() -> Self {
		HostError::WriteConflict {
			message: None,
			source: None,
		}
	}

	/// A write conflict with a message.
	pub fn write_conflict_with_message(message: impl Into<String>) -> Self {
		HostError::WriteConflict {
			message: Some(message.into()),
			source: None,
		}
	}

	/// A write conflict caused by another error, optionally with a message.
	pub fn write_conflict_caused_by(
		message: Option<String>,
		cause: impl Into<Box<dyn StdError + Send + Sync + 'static>>,
	) -> Self {
		HostError::WriteConflict {
			message,
			source: Some(cause.into()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use serde_json::json;

	fn kw(name: &str) -> Keyword {
		Keyword::new(name).unwrap()
	}

	#[test]
	fn test_keyword_rejects_bad_names() {
		assert_eq!(Keyword::new(""), Err(SignalError::InvalidKeyword(String::new())));
		assert_eq!(Keyword::new(":"), Err(SignalError::InvalidKeyword(":".to_string())));
		assert!(Keyword::new("two words").is_err());
		assert_eq!(kw(":ok").name(), "ok");
	}

	#[test]
	fn test_permit_display() {
		let id = Uuid::nil();
		let permit = Permit::new(kw("view-congregation"), [id]);
		assert_eq!(
			permit.to_string(),
			"[:view-congregation 00000000-0000-0000-0000-000000000000]"
		);
	}

	#[test]
	fn test_no_permit_message() {
		let user_id = Uuid::from_u128(0x6c1f_42d8_9a07_4e5b_b3a1_0f2e_8d7c_5b49);
		let err = HostError::no_permit(user_id, Permit::new(kw("configure-congregation"), []));
		assert_eq!(
			err.to_string(),
			format!("User {} does not have permit [:configure-congregation]", user_id)
		);
	}

	#[test]
	fn test_validation_errors_must_not_be_empty() {
		assert_eq!(ValidationErrors::new(vec![]), Err(SignalError::NoErrors));
	}

	#[test]
	fn test_validation_errors_wire_shape() {
		let errors = ValidationErrors::new(vec![
			ValidationError::new(kw("missing-name")),
			ValidationError::new(kw("invalid-location")).with_detail("POINT(1 2)").with_detail(json!({"srid": 4326})),
		])
		.unwrap();

		let value = serde_json::to_value(&errors).unwrap();
		assert_eq!(
			value,
			json!([[":missing-name"], [":invalid-location", "POINT(1 2)", {"srid": 4326}]])
		);

		let back: ValidationErrors = serde_json::from_value(value).unwrap();
		assert_eq!(back, errors);
		assert_eq!(back.len(), 2);
		assert!(!back.is_empty());
		assert_eq!(back.find(&kw("missing-name")).unwrap().details.len(), 0);
	}

	#[test]
	fn test_validation_errors_reject_malformed_payloads() {
		assert!(serde_json::from_str::<ValidationErrors>("[]").is_err());
		assert!(serde_json::from_str::<ValidationErrors>("[[]]").is_err());
		assert!(serde_json::from_str::<ValidationErrors>("[[1]]").is_err());
		assert!(serde_json::from_str::<ValidationErrors>(r#"[":tag"]"#).is_err());
		assert!(serde_json::from_str::<ValidationErrors>(r#"[["not a keyword"]]"#).is_err());
	}

	#[test]
	fn test_validation_message_lists_errors() {
		let errors = ValidationErrors::new(vec![
			ValidationError::new(kw("missing-name")),
			ValidationError::new(kw("too-long")).with_detail("name").with_detail(100),
		])
		.unwrap();
		let err = HostError::validation(errors);
		assert_eq!(err.to_string(), r#"[[:missing-name] [:too-long "name" 100]]"#);
	}

	#[test]
	fn test_write_conflict_variants() {
		assert_eq!(HostError::write_conflict().to_string(), "write conflict");
		assert_eq!(
			HostError::write_conflict_with_message("stream was modified").to_string(),
			"stream was modified"
		);

		let cause = std::io::Error::new(std::io::ErrorKind::Other, "version mismatch");
		let err = HostError::write_conflict_caused_by(None, cause);
		assert_eq!(err.to_string(), "write conflict");
		assert_eq!(err.source().unwrap().to_string(), "version mismatch");
	}
}
