use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// One decoded value produced by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Nullable field decoded from an absent or null node.
	Null,
	/// Boolean.
	Bool(bool),
	/// 8-bit signed integer.
	I8(i8),
	/// 16-bit signed integer.
	I16(i16),
	/// 32-bit signed integer.
	I32(i32),
	/// 64-bit signed integer.
	I64(i64),
	/// 32-bit float.
	F32(f32),
	/// 64-bit float.
	F64(f64),
	/// Single character.
	Char(char),
	/// Text.
	Str(Box<str>),
	/// Matched enum case name.
	Enum(Box<str>),
	/// Ordered sequence of decoded elements.
	Seq(Vec<Value>),
	/// Record fields in declaration order.
	Record(Vec<(Box<str>, Value)>),
	/// Map entries in tree order, keys decoded to the declared key type.
	Map(Vec<(Value, Value)>),
	/// Polymorphic choice: selected case and its decoded payload.
	Variant {
		/// Discriminator that selected the payload shape.
		case: Box<str>,
		/// Decoded payload.
		value: Box<Value>,
	},
}

impl Serialize for Value {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		match self {
			Self::Null => serializer.serialize_unit(),
			Self::Bool(value) => serializer.serialize_bool(*value),
			Self::I8(value) => serializer.serialize_i8(*value),
			Self::I16(value) => serializer.serialize_i16(*value),
			Self::I32(value) => serializer.serialize_i32(*value),
			Self::I64(value) => serializer.serialize_i64(*value),
			Self::F32(value) => serializer.serialize_f32(*value),
			Self::F64(value) => serializer.serialize_f64(*value),
			Self::Char(value) => serializer.serialize_char(*value),
			Self::Str(text) | Self::Enum(text) => serializer.serialize_str(text),
			Self::Seq(items) => {
				let mut seq = serializer.serialize_seq(Some(items.len()))?;
				for item in items {
					seq.serialize_element(item)?;
				}
				seq.end()
			}
			Self::Record(fields) => {
				let mut map = serializer.serialize_map(Some(fields.len()))?;
				for (name, value) in fields {
					map.serialize_entry(name.as_ref(), value)?;
				}
				map.end()
			}
			Self::Map(entries) => {
				let mut map = serializer.serialize_map(Some(entries.len()))?;
				for (key, value) in entries {
					map.serialize_entry(key, value)?;
				}
				map.end()
			}
			Self::Variant { case, value } => {
				let mut map = serializer.serialize_map(Some(2))?;
				map.serialize_entry("type", case.as_ref())?;
				map.serialize_entry("value", value)?;
				map.end()
			}
		}
	}
}
