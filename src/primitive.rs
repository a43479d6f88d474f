//! Primitive value decoding: coercion of one fetched tree node into a
//! single primitive kind. Shared by all three structural readers; map
//! keys decode through the same paths via synthesized leaf nodes.

use crate::error::{DecodeError, Result};
use crate::node::ConfigNode;
use crate::scalar::Scalar;
use crate::shape::{PrimitiveKind, ShapeDescriptor};
use crate::value::Value;

/// Decode `node` as the requested primitive kind.
pub(crate) fn decode_primitive(node: &ConfigNode, kind: PrimitiveKind) -> Result<Value> {
	match kind {
		PrimitiveKind::Str => Ok(Value::Str(node_text(node, "a String")?.into_boxed_str())),
		PrimitiveKind::Char => {
			let text = node_text(node, "a Char")?;
			let mut chars = text.chars();
			match (chars.next(), chars.next()) {
				(Some(only), None) => Ok(Value::Char(only)),
				_ => Err(DecodeError::coercion(node.path(), "a Char")),
			}
		}
		PrimitiveKind::Bool => {
			let value = scalar(node, "a Boolean")?.as_bool().ok_or_else(|| DecodeError::coercion(node.path(), "a Boolean"))?;
			Ok(Value::Bool(value))
		}
		PrimitiveKind::I8 => Ok(Value::I8(int_in_width(node, "a Byte", i64::from(i8::MIN), i64::from(i8::MAX))? as i8)),
		PrimitiveKind::I16 => Ok(Value::I16(int_in_width(node, "a Short", i64::from(i16::MIN), i64::from(i16::MAX))? as i16)),
		PrimitiveKind::I32 => Ok(Value::I32(int_in_width(node, "an Integer", i64::from(i32::MIN), i64::from(i32::MAX))? as i32)),
		PrimitiveKind::I64 => {
			let value = scalar(node, "a Long")?.as_i64().ok_or_else(|| DecodeError::coercion(node.path(), "a Long"))?;
			Ok(Value::I64(value))
		}
		PrimitiveKind::F32 => {
			let value = scalar(node, "a Float")?.as_f64().ok_or_else(|| DecodeError::coercion(node.path(), "a Float"))?;
			Ok(Value::F32(value as f32))
		}
		PrimitiveKind::F64 => {
			let value = scalar(node, "a Double")?.as_f64().ok_or_else(|| DecodeError::coercion(node.path(), "a Double"))?;
			Ok(Value::F64(value))
		}
		PrimitiveKind::Raw => Ok(match scalar(node, "a raw value")? {
			Scalar::Bool(value) => Value::Bool(*value),
			Scalar::Int(value) => Value::I64(*value),
			Scalar::Float(value) => Value::F64(*value),
			Scalar::Str(text) => Value::Str(text.clone()),
		}),
	}
}

/// Decode `node` as a case of the enum described by `shape`.
///
/// The stringified value must exactly match a declared case name; the
/// first match wins.
pub(crate) fn decode_enum(node: &ConfigNode, shape: &ShapeDescriptor) -> Result<Value> {
	let case = node_text(node, "an enum case")?;
	let index = shape
		.element_index(&case)
		.ok_or_else(|| DecodeError::unknown_enum_case(node.path(), &case, shape.name()))?;
	Ok(Value::Enum(shape.case_names()[index].clone()))
}

/// Nullable presence mark: true iff the node exists in the tree and
/// holds a value. Drives null-versus-value decoding upstream; never an
/// error by itself.
pub(crate) fn is_present(node: &ConfigNode) -> bool {
	!node.is_virtual() && node.has_value()
}

/// Stringified view of the node's raw value.
pub(crate) fn node_text(node: &ConfigNode, expected: &'static str) -> Result<String> {
	Ok(scalar(node, expected)?.to_string())
}

fn scalar<'n>(node: &'n ConfigNode, expected: &'static str) -> Result<&'n Scalar> {
	node.raw().ok_or_else(|| DecodeError::coercion(node.path(), expected))
}

fn int_in_width(node: &ConfigNode, expected: &'static str, min: i64, max: i64) -> Result<i64> {
	let value = scalar(node, expected)?.as_i64().ok_or_else(|| DecodeError::coercion(node.path(), expected))?;
	if value < min || value > max {
		return Err(DecodeError::coercion(node.path(), expected));
	}
	Ok(value)
}
