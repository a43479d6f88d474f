use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Failure raised while decoding a configuration tree against a shape.
///
/// The first error raised during the depth-first walk aborts the whole
/// decode; there is no partial result or per-field recovery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {message}")]
pub struct DecodeError {
	/// Path of the offending tree node.
	pub path: Box<str>,
	/// Primitive or shape that was expected at the node.
	pub expected: &'static str,
	/// Human-readable failure description.
	pub message: Box<str>,
}

impl DecodeError {
	pub(crate) fn new(path: &str, expected: &'static str, message: impl Into<String>) -> Self {
		Self {
			path: display_path(path),
			expected,
			message: message.into().into_boxed_str(),
		}
	}

	/// Node value could not coerce into the expected primitive.
	pub(crate) fn coercion(path: &str, expected: &'static str) -> Self {
		Self::new(path, expected, format!("could not be converted into {expected}"))
	}

	/// Required record field resolved to a virtual node with no default.
	pub(crate) fn missing_field(path: &str) -> Self {
		Self::new(path, "a value", "required field is missing and has no default")
	}

	/// Enum string did not match any declared case name.
	pub(crate) fn unknown_enum_case(path: &str, case: &str, shape: &str) -> Self {
		Self::new(path, "an enum case", format!("'{case}' is not a case of {shape}"))
	}

	/// Named shape reference had no registry entry.
	pub(crate) fn unregistered_shape(path: &str, name: &str) -> Self {
		Self::new(path, "a registered shape", format!("shape '{name}' is not registered"))
	}
}

fn display_path(path: &str) -> Box<str> {
	if path.is_empty() { "<root>".into() } else { path.into() }
}
