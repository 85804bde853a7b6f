//! Strongly typed configuration identifier shared across the broker domain.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

const IDENTIFIER_MAX_LEN: usize = 128;

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("Configuration identifier cannot be empty.")]
	Empty,
	/// The identifier contains whitespace characters.
	#[error("Configuration identifier contains whitespace.")]
	ContainsWhitespace,
	/// The identifier exceeded the allowed character count.
	#[error("Configuration identifier exceeds {max} characters.")]
	TooLong {
		/// Maximum permitted character count.
		max: usize,
	},
}

/// Unique identifier for one identity-provider tenant configuration.
///
/// Stable for the tenant's lifetime; used as the key for discovery caching and
/// flow-state bookkeeping.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConfigId(String);
impl ConfigId {
	/// Creates a new identifier after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
		let view = value.as_ref();

		validate_view(view)?;

		Ok(Self(view.to_owned()))
	}
}
impl Deref for ConfigId {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for ConfigId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl From<ConfigId> for String {
	fn from(value: ConfigId) -> Self {
		value.0
	}
}
impl TryFrom<String> for ConfigId {
	type Error = IdentifierError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_view(&value)?;

		Ok(Self(value))
	}
}
impl Borrow<str> for ConfigId {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl Debug for ConfigId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Config({})", self.0)
	}
}
impl Display for ConfigId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl FromStr for ConfigId {
	type Err = IdentifierError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

fn validate_view(view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty);
	}
	if view.chars().any(char::is_whitespace) {
		return Err(IdentifierError::ContainsWhitespace);
	}
	if view.len() > IDENTIFIER_MAX_LEN {
		return Err(IdentifierError::TooLong { max: IDENTIFIER_MAX_LEN });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn identifiers_reject_whitespace_and_empty_input() {
		assert!(ConfigId::new("").is_err());
		assert!(ConfigId::new(" config-1").is_err());
		assert!(ConfigId::new("config-1 ").is_err());
		assert!(ConfigId::new("with space").is_err());

		let id = ConfigId::new("config-1").expect("Identifier fixture should be valid.");

		assert_eq!(id.as_ref(), "config-1");
	}

	#[test]
	fn serde_round_trip_enforces_validation() {
		let id: ConfigId =
			serde_json::from_str("\"config-42\"").expect("Identifier should deserialize.");

		assert_eq!(id.as_ref(), "config-42");
		assert!(serde_json::from_str::<ConfigId>("\"with space\"").is_err());
		assert!(serde_json::from_str::<ConfigId>("\"\"").is_err());
	}

	#[test]
	fn length_limit_is_enforced_exactly() {
		let exact = "a".repeat(IDENTIFIER_MAX_LEN);

		ConfigId::new(&exact).expect("Exact length should succeed.");

		let too_long = "a".repeat(IDENTIFIER_MAX_LEN + 1);

		assert!(ConfigId::new(&too_long).is_err());
	}

	#[test]
	fn borrow_supports_fast_lookup() {
		let map: HashMap<ConfigId, u8> = HashMap::from_iter([(
			ConfigId::new("config-1").expect("Identifier used for lookup should be valid."),
			7_u8,
		)]);

		assert_eq!(map.get("config-1"), Some(&7));
	}
}
