use serde_json::Value as Json;

use crate::node::ConfigNode;
use crate::scalar::Scalar;
use crate::tag::compose;

/// Convert a parsed JSON document into a configuration tree.
///
/// Node paths are assigned during conversion: map entries extend the
/// parent path with `.key`, list elements with `[index]`.
pub fn from_json(root: &Json) -> ConfigNode {
	build("", root)
}

/// Parse JSON text and convert it into a configuration tree.
pub fn from_json_str(text: &str) -> serde_json::Result<ConfigNode> {
	Ok(from_json(&serde_json::from_str(text)?))
}

fn build(path: &str, value: &Json) -> ConfigNode {
	match value {
		Json::Null => ConfigNode::null(path),
		Json::Bool(value) => ConfigNode::scalar(path, Scalar::Bool(*value)),
		Json::Number(number) => ConfigNode::scalar(path, scalar_number(number)),
		Json::String(text) => ConfigNode::scalar(path, Scalar::Str(text.as_str().into())),
		Json::Array(items) => {
			let children = items
				.iter()
				.enumerate()
				.map(|(index, item)| build(&format!("{path}[{index}]"), item))
				.collect();
			ConfigNode::list(path, children)
		}
		Json::Object(entries) => {
			let entries = entries
				.iter()
				.map(|(key, item)| (key.as_str().into(), build(&compose(path, key), item)))
				.collect();
			ConfigNode::map(path, entries)
		}
	}
}

fn scalar_number(number: &serde_json::Number) -> Scalar {
	if let Some(value) = number.as_i64() {
		Scalar::Int(value)
	} else {
		Scalar::Float(number.as_f64().unwrap_or(f64::NAN))
	}
}

#[cfg(test)]
mod tests {
	use super::from_json_str;
	use crate::scalar::Scalar;

	#[test]
	fn paths_follow_structure() {
		let root = from_json_str(r#"{"a": {"b": [10, 20]}}"#).expect("json parses");
		let first = root.child_by_path("a.b");
		assert_eq!(first.children()[1].path(), "a.b[1]");
		assert_eq!(first.children()[1].raw(), Some(&Scalar::Int(20)));
	}

	#[test]
	fn null_becomes_present_empty_node() {
		let root = from_json_str(r#"{"x": null}"#).expect("json parses");
		let node = root.child_by_path("x");
		assert!(!node.is_virtual());
		assert!(!node.has_value());
	}

	#[test]
	fn big_unsigned_falls_back_to_float() {
		let root = from_json_str(r#"{"n": 18446744073709551615}"#).expect("json parses");
		assert!(matches!(root.child_by_path("n").raw(), Some(Scalar::Float(_))));
	}
}
