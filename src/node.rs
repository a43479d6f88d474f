use std::borrow::Cow;

use crate::scalar::Scalar;
use crate::tag::compose;

/// Value payload held at one tree position.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeValue {
	/// No value: an explicit null in the source, or a virtual node.
	Empty,
	/// Leaf scalar.
	Scalar(Scalar),
	/// Ordered list of child nodes.
	List(Vec<ConfigNode>),
	/// Ordered mapping of key to child node.
	Map(Vec<(Box<str>, ConfigNode)>),
}

/// One addressable position in a configuration tree.
///
/// Trees are produced by an external loader (see [`crate::from_json`])
/// and borrowed read-only by the decoder. A probed-but-missing address
/// is represented by a virtual node, which is not an error by itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigNode {
	path: Box<str>,
	value: NodeValue,
	virtual_: bool,
}

impl ConfigNode {
	/// Leaf node holding a scalar.
	pub fn scalar(path: impl Into<Box<str>>, value: Scalar) -> Self {
		Self {
			path: path.into(),
			value: NodeValue::Scalar(value),
			virtual_: false,
		}
	}

	/// Node holding an explicit null.
	pub fn null(path: impl Into<Box<str>>) -> Self {
		Self {
			path: path.into(),
			value: NodeValue::Empty,
			virtual_: false,
		}
	}

	/// Node holding an ordered list of children.
	pub fn list(path: impl Into<Box<str>>, children: Vec<ConfigNode>) -> Self {
		Self {
			path: path.into(),
			value: NodeValue::List(children),
			virtual_: false,
		}
	}

	/// Node holding an ordered key/value mapping.
	pub fn map(path: impl Into<Box<str>>, entries: Vec<(Box<str>, ConfigNode)>) -> Self {
		Self {
			path: path.into(),
			value: NodeValue::Map(entries),
			virtual_: false,
		}
	}

	/// Virtual node standing in for a probed-but-missing address.
	pub fn virtual_at(path: impl Into<Box<str>>) -> Self {
		Self {
			path: path.into(),
			value: NodeValue::Empty,
			virtual_: true,
		}
	}

	/// Human-readable path of this node, for diagnostics only.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Raw scalar value, or `None` when absent.
	pub fn raw(&self) -> Option<&Scalar> {
		match &self.value {
			NodeValue::Scalar(value) => Some(value),
			_ => None,
		}
	}

	/// True when this address was probed but nothing exists there.
	pub fn is_virtual(&self) -> bool {
		self.virtual_
	}

	/// True when the node holds any value at all (scalar or children).
	pub fn has_value(&self) -> bool {
		!matches!(self.value, NodeValue::Empty)
	}

	/// Ordered child nodes; empty unless the node is list-shaped.
	pub fn children(&self) -> &[ConfigNode] {
		match &self.value {
			NodeValue::List(children) => children,
			_ => &[],
		}
	}

	/// Ordered key/value entries; empty unless the node is map-shaped.
	pub fn entries(&self) -> &[(Box<str>, ConfigNode)] {
		match &self.value {
			NodeValue::Map(entries) => entries,
			_ => &[],
		}
	}

	/// Direct child by key, for map-shaped nodes.
	pub fn child(&self, key: &str) -> Option<&ConfigNode> {
		self.entries().iter().find(|(name, _)| name.as_ref() == key).map(|(_, node)| node)
	}

	/// Walk a dotted path, one segment per map key.
	///
	/// Never fails: a missing segment yields a virtual node carrying the
	/// full path that was probed. An empty path yields the node itself.
	pub fn child_by_path(&self, path: &str) -> Cow<'_, ConfigNode> {
		if path.is_empty() {
			return Cow::Borrowed(self);
		}

		let mut current = self;
		let mut segments = path.split('.');
		while let Some(segment) = segments.next() {
			match current.child(segment) {
				Some(next) => current = next,
				None => {
					let mut missing = compose(current.path(), segment);
					for rest in segments {
						missing = compose(&missing, rest);
					}
					return Cow::Owned(ConfigNode::virtual_at(missing));
				}
			}
		}
		Cow::Borrowed(current)
	}
}
