/// Reader-local address of the element currently being decoded.
///
/// Tags are not globally meaningful; each structural reader defines its
/// own addressing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Tag {
	/// Dotted path relative to a record reader's node.
	Path(Box<str>),
	/// Position index for sequence and map readers.
	Index(usize),
}

/// Join a parent path and a child name with the `.` separator.
pub(crate) fn compose(parent: &str, child: &str) -> String {
	if parent.is_empty() {
		child.to_owned()
	} else {
		format!("{parent}.{child}")
	}
}

#[cfg(test)]
mod tests {
	use super::compose;

	#[test]
	fn empty_parent_yields_child() {
		assert_eq!(compose("", "e"), "e");
	}

	#[test]
	fn nonempty_parent_is_dotted() {
		assert_eq!(compose("b", "e"), "b.e");
		assert_eq!(compose("a.b", "c"), "a.b.c");
	}
}
