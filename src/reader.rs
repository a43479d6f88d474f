//! Structural readers: the decode-element iteration protocol for each
//! tree shape. Each reader owns a forward-only cursor scoped to exactly
//! one subtree and knows how to transition into nested structures.

use std::borrow::Cow;
use std::ptr;

use crate::error::{DecodeError, Result};
use crate::node::ConfigNode;
use crate::scalar::Scalar;
use crate::shape::ShapeDescriptor;
use crate::tag::{Tag, compose};

/// Structural family a nested shape decodes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NestedShape {
	/// Record or singleton subtree.
	Record,
	/// Sequence or polymorphic-choice subtree.
	Sequence,
	/// Associative-map subtree.
	Map,
}

/// Composite-reader capability: one structural reader per tree shape.
#[derive(Debug)]
pub(crate) enum Reader<'t> {
	/// Named-field reader for record and singleton shapes.
	Record(RecordReader<'t>),
	/// Positional reader for sequence and choice shapes.
	Sequence(SequenceReader<'t>),
	/// Alternating key/value reader for map shapes.
	Map(MapReader<'t>),
}

impl<'t> Reader<'t> {
	/// Advance the cursor. Yields the element's descriptor position and
	/// its reader-local tag, or `None` once elements are exhausted.
	pub(crate) fn next_element(&mut self, shape: &ShapeDescriptor) -> Option<(usize, Tag)> {
		match self {
			Self::Record(reader) => reader.next_element(shape),
			Self::Sequence(reader) => reader.next_element(),
			Self::Map(reader) => reader.next_element(),
		}
	}

	/// Fetch the node addressed by `tag`.
	pub(crate) fn node_for(&self, tag: &Tag) -> Result<Cow<'t, ConfigNode>> {
		match (self, tag) {
			(Self::Record(reader), Tag::Path(path)) => Ok(reader.node_at(path)),
			(Self::Sequence(reader), Tag::Index(index)) => Ok(Cow::Borrowed(reader.node_at(*index)?)),
			(Self::Map(reader), Tag::Index(index)) => reader.node_at(*index),
			(reader, tag) => Err(foreign_tag(reader.path(), tag)),
		}
	}

	/// Open a nested reader over the subtree addressed by `tag`.
	pub(crate) fn open_nested(&self, tag: &Tag, family: NestedShape) -> Result<Reader<'t>> {
		match (self, tag) {
			(Self::Record(reader), Tag::Path(path)) => reader.open_nested(path, family),
			(Self::Sequence(reader), Tag::Index(index)) => Ok(open_over(reader.node_at(*index)?, family)),
			(Self::Map(reader), Tag::Index(index)) => Ok(open_over(reader.value_at(*index)?, family)),
			(reader, tag) => Err(foreign_tag(reader.path(), tag)),
		}
	}

	/// Path of the subtree this reader is scoped to, for diagnostics.
	pub(crate) fn path(&self) -> &str {
		match self {
			Self::Record(reader) => reader.node.path(),
			Self::Sequence(reader) => &reader.path,
			Self::Map(reader) => &reader.path,
		}
	}
}

/// Reader for named-field shapes. Tags are dotted paths relative to the
/// reader's node.
#[derive(Debug)]
pub(crate) struct RecordReader<'t> {
	node: &'t ConfigNode,
	base: Box<str>,
	cursor: usize,
}

impl<'t> RecordReader<'t> {
	/// Reader rooted at `node` with an empty base path.
	pub(crate) fn new(node: &'t ConfigNode) -> Self {
		Self {
			node,
			base: "".into(),
			cursor: 0,
		}
	}

	fn next_element(&mut self, shape: &ShapeDescriptor) -> Option<(usize, Tag)> {
		while self.cursor < shape.element_count() {
			let position = self.cursor;
			self.cursor += 1;
			let name = shape.element_name(position)?;
			let path = compose(&self.base, name);
			// virtual positions are skipped; the driver applies defaults
			if !self.node.child_by_path(&path).is_virtual() {
				return Some((position, Tag::Path(path.into_boxed_str())));
			}
		}
		None
	}

	fn node_at(&self, path: &str) -> Cow<'t, ConfigNode> {
		self.node.child_by_path(path)
	}

	fn open_nested(&self, path: &str, family: NestedShape) -> Result<Reader<'t>> {
		let fetched = subtree(self.node.child_by_path(path))?;
		if family == NestedShape::Record && ptr::eq(fetched, self.node) {
			// the fetch landed on this reader's own node: keep reading
			// it under the composed tag instead of re-rooting
			return Ok(Reader::Record(Self {
				node: self.node,
				base: path.into(),
				cursor: 0,
			}));
		}
		Ok(open_over(fetched, family))
	}
}

/// Reader for positional shapes over a materialized child list. Tags
/// are indexes into the list.
#[derive(Debug)]
pub(crate) struct SequenceReader<'t> {
	path: Box<str>,
	children: &'t [ConfigNode],
	cursor: usize,
}

impl<'t> SequenceReader<'t> {
	/// Reader over the ordered children of `node`.
	pub(crate) fn new(node: &'t ConfigNode) -> Self {
		Self {
			path: node.path().into(),
			children: node.children(),
			cursor: 0,
		}
	}

	fn next_element(&mut self) -> Option<(usize, Tag)> {
		if self.cursor < self.children.len() {
			let index = self.cursor;
			self.cursor += 1;
			Some((0, Tag::Index(index)))
		} else {
			None
		}
	}

	fn node_at(&self, index: usize) -> Result<&'t ConfigNode> {
		self.children.get(index).ok_or_else(|| out_of_bounds(&self.path, index))
	}
}

/// Reader for key/value shapes. Entries flatten into parallel key and
/// value lists; the element count doubles and a tag's parity selects
/// the key (even) or the value (odd) at `tag / 2`.
#[derive(Debug)]
pub(crate) struct MapReader<'t> {
	path: Box<str>,
	keys: Vec<Box<str>>,
	values: Vec<&'t ConfigNode>,
	cursor: usize,
}

impl<'t> MapReader<'t> {
	/// Reader over the key/value entries of `node`.
	pub(crate) fn new(node: &'t ConfigNode) -> Self {
		let entries = node.entries();
		Self {
			path: node.path().into(),
			keys: entries.iter().map(|(key, _)| key.clone()).collect(),
			values: entries.iter().map(|(_, value)| value).collect(),
			cursor: 0,
		}
	}

	fn next_element(&mut self) -> Option<(usize, Tag)> {
		if self.cursor < self.values.len() * 2 {
			let index = self.cursor;
			self.cursor += 1;
			Some((index % 2, Tag::Index(index)))
		} else {
			None
		}
	}

	fn node_at(&self, index: usize) -> Result<Cow<'t, ConfigNode>> {
		let entry = index / 2;
		if index % 2 == 0 {
			let key = self.keys.get(entry).ok_or_else(|| out_of_bounds(&self.path, index))?;
			// throwaway leaf holding the stringified key, so keys decode
			// through the ordinary primitive machinery
			Ok(Cow::Owned(ConfigNode::scalar(compose(&self.path, key), Scalar::Str(key.clone()))))
		} else {
			self.values.get(entry).map(|node| Cow::Borrowed(*node)).ok_or_else(|| out_of_bounds(&self.path, index))
		}
	}

	fn value_at(&self, index: usize) -> Result<&'t ConfigNode> {
		if index % 2 == 0 {
			return Err(DecodeError::new(&self.path, "a primitive key", "map keys cannot be composite"));
		}
		self.values.get(index / 2).copied().ok_or_else(|| out_of_bounds(&self.path, index))
	}
}

fn open_over<'t>(node: &'t ConfigNode, family: NestedShape) -> Reader<'t> {
	match family {
		NestedShape::Record => Reader::Record(RecordReader::new(node)),
		NestedShape::Sequence => Reader::Sequence(SequenceReader::new(node)),
		NestedShape::Map => Reader::Map(MapReader::new(node)),
	}
}

fn subtree(fetched: Cow<'_, ConfigNode>) -> Result<&ConfigNode> {
	match fetched {
		Cow::Borrowed(node) => Ok(node),
		Cow::Owned(node) => Err(DecodeError::coercion(node.path(), "a composite value")),
	}
}

fn foreign_tag(path: &str, tag: &Tag) -> DecodeError {
	DecodeError::new(path, "a reader-local tag", format!("tag {tag:?} does not belong to this reader"))
}

fn out_of_bounds(path: &str, index: usize) -> DecodeError {
	DecodeError::new(path, "an element", format!("element index {index} is out of bounds"))
}

#[cfg(test)]
mod tests {
	use super::{MapReader, Reader, RecordReader};
	use crate::node::ConfigNode;
	use crate::scalar::Scalar;
	use crate::shape::{FieldShape, PrimitiveKind, ShapeDescriptor, ShapeRef};
	use crate::tag::Tag;

	fn record_shape() -> ShapeDescriptor {
		ShapeDescriptor::record(
			"Pair",
			vec![
				FieldShape::new("a", ShapeRef::primitive(PrimitiveKind::I32)),
				FieldShape::new("b", ShapeRef::primitive(PrimitiveKind::I32)),
				FieldShape::new("c", ShapeRef::primitive(PrimitiveKind::I32)),
			],
		)
	}

	#[test]
	fn record_reader_skips_virtual_positions() {
		let node = ConfigNode::map(
			"",
			vec![
				("a".into(), ConfigNode::scalar("a", Scalar::Int(1))),
				("c".into(), ConfigNode::scalar("c", Scalar::Int(3))),
			],
		);
		let shape = record_shape();
		let mut reader = Reader::Record(RecordReader::new(&node));

		let (position, tag) = reader.next_element(&shape).expect("first element");
		assert_eq!((position, tag), (0, Tag::Path("a".into())));
		let (position, _) = reader.next_element(&shape).expect("third element");
		assert_eq!(position, 2);
		assert!(reader.next_element(&shape).is_none());
	}

	#[test]
	fn map_reader_alternates_keys_and_values() {
		let node = ConfigNode::map(
			"m",
			vec![
				("x".into(), ConfigNode::scalar("m.x", Scalar::Int(1))),
				("y".into(), ConfigNode::scalar("m.y", Scalar::Int(2))),
			],
		);
		let shape = ShapeDescriptor::map("M", ShapeRef::primitive(PrimitiveKind::Str), ShapeRef::primitive(PrimitiveKind::I32)).expect("map shape");
		let mut reader = Reader::Map(MapReader::new(&node));

		let mut seen = Vec::new();
		while let Some((position, tag)) = reader.next_element(&shape) {
			seen.push((position, tag.clone()));
		}
		assert_eq!(seen.len(), 4);
		assert_eq!(seen[0], (0, Tag::Index(0)));
		assert_eq!(seen[3], (1, Tag::Index(3)));

		// even tag synthesizes a key leaf, odd tag fetches the real node
		let key_node = reader.node_for(&Tag::Index(2)).expect("key node");
		assert_eq!(key_node.raw(), Some(&Scalar::Str("y".into())));
		let value_node = reader.node_for(&Tag::Index(3)).expect("value node");
		assert_eq!(value_node.raw(), Some(&Scalar::Int(2)));
	}
}
