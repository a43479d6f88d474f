use std::sync::Arc;

use crate::error::{DecodeError, Result};
use crate::value::Value;

/// Primitive target kinds understood by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
	/// Text; any scalar stringifies.
	Str,
	/// Single character (stringified value of length 1).
	Char,
	/// Boolean.
	Bool,
	/// 8-bit signed integer, range-checked.
	I8,
	/// 16-bit signed integer, range-checked.
	I16,
	/// 32-bit signed integer, range-checked.
	I32,
	/// 64-bit signed integer.
	I64,
	/// 32-bit float.
	F32,
	/// 64-bit float.
	F64,
	/// Raw scalar, passed through unchanged.
	Raw,
}

/// Structural kind of a shape descriptor. Closed; the decoder matches
/// it exhaustively.
#[derive(Debug)]
pub enum ShapeKind {
	/// Single leaf value.
	Primitive(PrimitiveKind),
	/// Named fields decoded in declaration order.
	Record(Vec<FieldShape>),
	/// Zero-field singleton object.
	Singleton,
	/// Homogeneous ordered list of one element shape.
	Sequence(ShapeRef),
	/// Key/value mapping.
	Map {
		/// Shape of every key; primitive or enum only.
		key: ShapeRef,
		/// Shape of every value.
		value: ShapeRef,
	},
	/// Polymorphic choice decoded as a `[discriminator, payload]` list,
	/// the payload shape resolved from the registry by discriminator.
	Choice,
	/// Closed set of named cases.
	Enum(Vec<Box<str>>),
}

/// One named element of a record shape.
#[derive(Debug)]
pub struct FieldShape {
	/// Field name as it appears in the tree.
	pub name: Box<str>,
	/// Field value shape.
	pub shape: ShapeRef,
	/// When set, an explicit null decodes to `Value::Null`.
	pub nullable: bool,
	/// Applied when the field's node is virtual.
	pub default: Option<Value>,
}

impl FieldShape {
	/// Required, non-nullable field.
	pub fn new(name: impl Into<Box<str>>, shape: ShapeRef) -> Self {
		Self {
			name: name.into(),
			shape,
			nullable: false,
			default: None,
		}
	}

	/// Mark the field nullable.
	pub fn nullable(mut self) -> Self {
		self.nullable = true;
		self
	}

	/// Attach a default used when the field is absent from the tree.
	pub fn with_default(mut self, value: Value) -> Self {
		self.default = Some(value);
		self
	}
}

/// Reference to a shape, either embedded or resolved by name through
/// the registry at decode time. Named references support recursive
/// shapes and choice payloads.
#[derive(Debug, Clone)]
pub enum ShapeRef {
	/// Directly embedded descriptor.
	Inline(Arc<ShapeDescriptor>),
	/// Registry name resolved during decoding.
	Named(Box<str>),
}

impl ShapeRef {
	/// Embed a descriptor inline.
	pub fn inline(shape: ShapeDescriptor) -> Self {
		Self::Inline(Arc::new(shape))
	}

	/// Shorthand for an inline primitive shape.
	pub fn primitive(kind: PrimitiveKind) -> Self {
		Self::inline(ShapeDescriptor::primitive(kind))
	}

	/// Reference a registered shape by name.
	pub fn named(name: impl Into<Box<str>>) -> Self {
		Self::Named(name.into())
	}
}

/// Schema metadata for exactly one target type.
///
/// Immutable, created once per type, and shared read-only across all
/// decode calls (wrap in [`Arc`] to register or embed).
#[derive(Debug)]
pub struct ShapeDescriptor {
	name: Box<str>,
	kind: ShapeKind,
}

impl ShapeDescriptor {
	/// Anonymous primitive shape.
	pub fn primitive(kind: PrimitiveKind) -> Self {
		let name = match kind {
			PrimitiveKind::Str => "string",
			PrimitiveKind::Char => "char",
			PrimitiveKind::Bool => "boolean",
			PrimitiveKind::I8 => "byte",
			PrimitiveKind::I16 => "short",
			PrimitiveKind::I32 => "int",
			PrimitiveKind::I64 => "long",
			PrimitiveKind::F32 => "float",
			PrimitiveKind::F64 => "double",
			PrimitiveKind::Raw => "raw",
		};
		Self {
			name: name.into(),
			kind: ShapeKind::Primitive(kind),
		}
	}

	/// Record shape with named fields in declaration order.
	pub fn record(name: impl Into<Box<str>>, fields: Vec<FieldShape>) -> Self {
		Self {
			name: name.into(),
			kind: ShapeKind::Record(fields),
		}
	}

	/// Zero-field singleton object shape.
	pub fn singleton(name: impl Into<Box<str>>) -> Self {
		Self {
			name: name.into(),
			kind: ShapeKind::Singleton,
		}
	}

	/// Homogeneous sequence shape.
	pub fn sequence(name: impl Into<Box<str>>, element: ShapeRef) -> Self {
		Self {
			name: name.into(),
			kind: ShapeKind::Sequence(element),
		}
	}

	/// Associative map shape. Inline key shapes must be primitive or
	/// enum; keys are never composite.
	pub fn map(name: impl Into<Box<str>>, key: ShapeRef, value: ShapeRef) -> Result<Self> {
		let name = name.into();
		if let ShapeRef::Inline(shape) = &key {
			if !shape.is_key_shape() {
				return Err(DecodeError::new(&name, "a primitive key shape", format!("map key shape '{}' is not primitive", shape.name())));
			}
		}
		Ok(Self {
			name,
			kind: ShapeKind::Map { key, value },
		})
	}

	/// Polymorphic choice shape.
	pub fn choice(name: impl Into<Box<str>>) -> Self {
		Self {
			name: name.into(),
			kind: ShapeKind::Choice,
		}
	}

	/// Enum shape with its declared case names.
	pub fn enumeration(name: impl Into<Box<str>>, cases: &[&str]) -> Self {
		Self {
			name: name.into(),
			kind: ShapeKind::Enum(cases.iter().map(|case| Box::from(*case)).collect()),
		}
	}

	/// Type name, used in diagnostics and for registration.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Structural kind.
	pub fn kind(&self) -> &ShapeKind {
		&self.kind
	}

	/// Number of addressable elements.
	pub fn element_count(&self) -> usize {
		match &self.kind {
			ShapeKind::Primitive(_) | ShapeKind::Singleton => 0,
			ShapeKind::Record(fields) => fields.len(),
			ShapeKind::Sequence(_) => 1,
			ShapeKind::Map { .. } | ShapeKind::Choice => 2,
			ShapeKind::Enum(cases) => cases.len(),
		}
	}

	/// Element name by position.
	pub fn element_name(&self, index: usize) -> Option<&str> {
		match &self.kind {
			ShapeKind::Record(fields) => fields.get(index).map(|field| field.name.as_ref()),
			ShapeKind::Sequence(_) if index == 0 => Some("element"),
			ShapeKind::Map { .. } => match index {
				0 => Some("key"),
				1 => Some("value"),
				_ => None,
			},
			ShapeKind::Choice => match index {
				0 => Some("type"),
				1 => Some("value"),
				_ => None,
			},
			ShapeKind::Enum(cases) => cases.get(index).map(AsRef::as_ref),
			_ => None,
		}
	}

	/// Element position by name, or `None` when not found.
	pub fn element_index(&self, name: &str) -> Option<usize> {
		(0..self.element_count()).find(|index| self.element_name(*index) == Some(name))
	}

	/// Shape reference of the element at `index`, where one is declared.
	pub fn element_shape(&self, index: usize) -> Option<&ShapeRef> {
		match &self.kind {
			ShapeKind::Record(fields) => fields.get(index).map(|field| &field.shape),
			ShapeKind::Sequence(element) => (index == 0).then_some(element),
			ShapeKind::Map { key, value } => match index {
				0 => Some(key),
				1 => Some(value),
				_ => None,
			},
			_ => None,
		}
	}

	/// Declared case names; empty unless the shape is an enum.
	pub fn case_names(&self) -> &[Box<str>] {
		match &self.kind {
			ShapeKind::Enum(cases) => cases,
			_ => &[],
		}
	}

	pub(crate) fn is_key_shape(&self) -> bool {
		matches!(self.kind, ShapeKind::Primitive(_) | ShapeKind::Enum(_))
	}
}

#[cfg(test)]
mod tests {
	use super::{FieldShape, PrimitiveKind, ShapeDescriptor, ShapeRef};

	#[test]
	fn record_element_surface() {
		let shape = ShapeDescriptor::record(
			"Server",
			vec![
				FieldShape::new("host", ShapeRef::primitive(PrimitiveKind::Str)),
				FieldShape::new("port", ShapeRef::primitive(PrimitiveKind::I32)),
			],
		);
		assert_eq!(shape.element_count(), 2);
		assert_eq!(shape.element_name(1), Some("port"));
		assert_eq!(shape.element_index("host"), Some(0));
		assert_eq!(shape.element_index("nope"), None);
	}

	#[test]
	fn enum_cases_are_elements() {
		let shape = ShapeDescriptor::enumeration("Mode", &["on", "off"]);
		assert_eq!(shape.element_count(), 2);
		assert_eq!(shape.element_index("off"), Some(1));
		assert_eq!(shape.case_names().len(), 2);
	}

	#[test]
	fn composite_map_keys_are_rejected() {
		let composite = ShapeRef::inline(ShapeDescriptor::record("K", vec![]));
		let result = ShapeDescriptor::map("Bad", composite, ShapeRef::primitive(PrimitiveKind::I32));
		assert!(result.is_err());
	}
}
