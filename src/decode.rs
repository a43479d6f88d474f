//! Engine entry point and composite driver: binds a shape descriptor to
//! a tree node, selects the structural reader for the shape, and drives
//! decoding to completion or first failure.

use crate::error::{DecodeError, Result};
use crate::node::ConfigNode;
use crate::primitive;
use crate::reader::{MapReader, NestedShape, Reader, RecordReader, SequenceReader};
use crate::registry::ShapeRegistry;
use crate::shape::{FieldShape, ShapeDescriptor, ShapeKind, ShapeRef};
use crate::tag::{Tag, compose};
use crate::value::Value;

/// Decode `node` against `shape`, resolving named shape references and
/// choice discriminators through `registry`.
///
/// The walk is pure, synchronous, and recursive; the first failure
/// aborts the whole call. Virtual nodes are not errors; only a required
/// value that fails to resolve is.
pub fn decode(node: &ConfigNode, shape: &ShapeDescriptor, registry: &ShapeRegistry) -> Result<Value> {
	match shape.kind() {
		ShapeKind::Primitive(kind) => primitive::decode_primitive(node, *kind),
		ShapeKind::Enum(_) => primitive::decode_enum(node, shape),
		ShapeKind::Record(_) | ShapeKind::Singleton => decode_composite(Reader::Record(RecordReader::new(node)), shape, registry),
		ShapeKind::Sequence(_) | ShapeKind::Choice => decode_composite(Reader::Sequence(SequenceReader::new(node)), shape, registry),
		ShapeKind::Map { .. } => decode_composite(Reader::Map(MapReader::new(node)), shape, registry),
	}
}

fn decode_composite(mut reader: Reader<'_>, shape: &ShapeDescriptor, registry: &ShapeRegistry) -> Result<Value> {
	match shape.kind() {
		ShapeKind::Record(fields) => decode_record(&mut reader, shape, fields, registry),
		ShapeKind::Singleton => decode_record(&mut reader, shape, &[], registry),
		ShapeKind::Sequence(element) => decode_sequence(&mut reader, shape, element, registry),
		ShapeKind::Map { key, value } => decode_map(&mut reader, shape, key, value, registry),
		ShapeKind::Choice => decode_choice(&mut reader, shape, registry),
		ShapeKind::Primitive(_) | ShapeKind::Enum(_) => Err(DecodeError::new(
			reader.path(),
			"a composite shape",
			format!("shape '{}' has no elements to read", shape.name()),
		)),
	}
}

fn decode_record(reader: &mut Reader<'_>, shape: &ShapeDescriptor, fields: &[FieldShape], registry: &ShapeRegistry) -> Result<Value> {
	let mut slots: Vec<Option<Value>> = Vec::new();
	slots.resize_with(fields.len(), || None);

	while let Some((position, tag)) = reader.next_element(shape) {
		let field = fields
			.get(position)
			.ok_or_else(|| DecodeError::new(reader.path(), "a record field", format!("element position {position} is out of range")))?;
		slots[position] = Some(decode_element(reader, &tag, &field.shape, field.nullable, registry)?);
	}

	let mut out = Vec::with_capacity(fields.len());
	for (field, slot) in fields.iter().zip(slots) {
		let value = match slot {
			Some(value) => value,
			None => match &field.default {
				Some(default) => default.clone(),
				None => return Err(DecodeError::missing_field(&compose(reader.path(), &field.name))),
			},
		};
		out.push((field.name.clone(), value));
	}
	Ok(Value::Record(out))
}

fn decode_sequence(reader: &mut Reader<'_>, shape: &ShapeDescriptor, element: &ShapeRef, registry: &ShapeRegistry) -> Result<Value> {
	let mut items = Vec::new();
	while let Some((_, tag)) = reader.next_element(shape) {
		items.push(decode_element(reader, &tag, element, false, registry)?);
	}
	Ok(Value::Seq(items))
}

fn decode_map(reader: &mut Reader<'_>, shape: &ShapeDescriptor, key: &ShapeRef, value: &ShapeRef, registry: &ShapeRegistry) -> Result<Value> {
	let key_shape = key.resolve_in(registry, reader.path())?;
	if !key_shape.is_key_shape() {
		return Err(DecodeError::new(
			reader.path(),
			"a primitive key shape",
			format!("map key shape '{}' is not primitive", key_shape.name()),
		));
	}

	let mut entries = Vec::new();
	let mut pending = None;
	while let Some((position, tag)) = reader.next_element(shape) {
		if position == 0 {
			pending = Some(decode_resolved(reader, &tag, key_shape, false, registry)?);
		} else if let Some(decoded_key) = pending.take() {
			entries.push((decoded_key, decode_element(reader, &tag, value, false, registry)?));
		}
	}
	Ok(Value::Map(entries))
}

// One-shot list convention: element 0 is the discriminator string,
// element 1 the payload, whose shape the discriminator names in the
// registry.
fn decode_choice(reader: &mut Reader<'_>, shape: &ShapeDescriptor, registry: &ShapeRegistry) -> Result<Value> {
	let Some((_, tag)) = reader.next_element(shape) else {
		return Err(DecodeError::new(
			reader.path(),
			"a choice discriminator",
			format!("choice '{}' requires a [discriminator, payload] list", shape.name()),
		));
	};
	let discriminator = reader.node_for(&tag)?;
	let case = primitive::node_text(&discriminator, "a String")?;
	let payload_shape = registry
		.resolve(&case)
		.ok_or_else(|| DecodeError::new(discriminator.path(), "a registered shape", format!("choice case '{case}' is not registered")))?;

	let Some((_, tag)) = reader.next_element(shape) else {
		return Err(DecodeError::new(
			reader.path(),
			"a choice payload",
			format!("choice '{}' is missing its payload element", shape.name()),
		));
	};
	let value = decode_resolved(reader, &tag, payload_shape, false, registry)?;
	Ok(Value::Variant {
		case: case.into_boxed_str(),
		value: Box::new(value),
	})
}

fn decode_element(reader: &Reader<'_>, tag: &Tag, reference: &ShapeRef, nullable: bool, registry: &ShapeRegistry) -> Result<Value> {
	let shape = reference.resolve_in(registry, reader.path())?;
	decode_resolved(reader, tag, shape, nullable, registry)
}

fn decode_resolved(reader: &Reader<'_>, tag: &Tag, shape: &ShapeDescriptor, nullable: bool, registry: &ShapeRegistry) -> Result<Value> {
	if nullable && !primitive::is_present(&*reader.node_for(tag)?) {
		return Ok(Value::Null);
	}
	match shape.kind() {
		ShapeKind::Primitive(kind) => primitive::decode_primitive(&*reader.node_for(tag)?, *kind),
		ShapeKind::Enum(_) => primitive::decode_enum(&*reader.node_for(tag)?, shape),
		ShapeKind::Record(_) | ShapeKind::Singleton => decode_composite(reader.open_nested(tag, NestedShape::Record)?, shape, registry),
		ShapeKind::Sequence(_) | ShapeKind::Choice => decode_composite(reader.open_nested(tag, NestedShape::Sequence)?, shape, registry),
		ShapeKind::Map { .. } => decode_composite(reader.open_nested(tag, NestedShape::Map)?, shape, registry),
	}
}
