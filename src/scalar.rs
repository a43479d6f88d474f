use std::fmt;

/// One leaf value held by a tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
	/// Boolean literal.
	Bool(bool),
	/// Signed integer literal.
	Int(i64),
	/// Floating-point literal.
	Float(f64),
	/// Text literal.
	Str(Box<str>),
}

impl Scalar {
	/// Coerce to a boolean.
	///
	/// Accepts booleans, the integers `1`/`0`, and the usual textual
	/// spellings (`true`/`t`/`yes`/`y`/`1` and their negatives),
	/// case-insensitively.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(value) => Some(*value),
			Self::Int(1) => Some(true),
			Self::Int(0) => Some(false),
			Self::Int(_) | Self::Float(_) => None,
			Self::Str(text) => match text.trim().to_ascii_lowercase().as_str() {
				"true" | "t" | "yes" | "y" | "1" => Some(true),
				"false" | "f" | "no" | "n" | "0" => Some(false),
				_ => None,
			},
		}
	}

	/// Coerce to a 64-bit integer.
	///
	/// Floats convert only when integral-valued; strings are parsed.
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Self::Bool(_) => None,
			Self::Int(value) => Some(*value),
			Self::Float(value) => {
				if value.is_finite() && value.fract() == 0.0 && *value >= i64::MIN as f64 && *value <= i64::MAX as f64 {
					Some(*value as i64)
				} else {
					None
				}
			}
			Self::Str(text) => text.trim().parse::<i64>().ok(),
		}
	}

	/// Coerce to a 64-bit float. Integers widen; strings are parsed.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Self::Bool(_) => None,
			Self::Int(value) => Some(*value as f64),
			Self::Float(value) => Some(*value),
			Self::Str(text) => text.trim().parse::<f64>().ok(),
		}
	}
}

impl fmt::Display for Scalar {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Bool(value) => write!(f, "{value}"),
			Self::Int(value) => write!(f, "{value}"),
			Self::Float(value) => write!(f, "{value}"),
			Self::Str(text) => f.write_str(text),
		}
	}
}
