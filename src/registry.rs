use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{DecodeError, Result};
use crate::shape::{ShapeDescriptor, ShapeRef};

/// Immutable name-to-descriptor mapping consulted during decoding.
///
/// Built once at startup, then passed by reference into
/// [`crate::decode`]; it is never mutated while decoding. Named shape
/// references and choice discriminators resolve through it.
#[derive(Debug, Default)]
pub struct ShapeRegistry {
	shapes: HashMap<Box<str>, Arc<ShapeDescriptor>>,
}

impl ShapeRegistry {
	/// Empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a descriptor under its own name.
	///
	/// Duplicate names are rejected so that a shape cannot silently
	/// change meaning between decode calls.
	pub fn register(&mut self, shape: Arc<ShapeDescriptor>) -> Result<()> {
		let name: Box<str> = shape.name().into();
		if self.shapes.contains_key(&name) {
			return Err(DecodeError::new(&name, "a unique shape name", format!("shape '{name}' is already registered")));
		}
		self.shapes.insert(name, shape);
		Ok(())
	}

	/// Resolve a registered descriptor by name.
	pub fn resolve(&self, name: &str) -> Option<&Arc<ShapeDescriptor>> {
		self.shapes.get(name)
	}
}

impl ShapeRef {
	/// Resolve this reference against `registry`, reporting failures at
	/// the tree path `at`.
	pub(crate) fn resolve_in<'a>(&'a self, registry: &'a ShapeRegistry, at: &str) -> Result<&'a ShapeDescriptor> {
		match self {
			Self::Inline(shape) => Ok(shape.as_ref()),
			Self::Named(name) => registry.resolve(name).map(Arc::as_ref).ok_or_else(|| DecodeError::unregistered_shape(at, name)),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use super::ShapeRegistry;
	use crate::shape::{ShapeDescriptor, ShapeRef};

	#[test]
	fn duplicate_registration_is_rejected() {
		let mut registry = ShapeRegistry::new();
		registry.register(Arc::new(ShapeDescriptor::singleton("Unit"))).expect("first registers");
		assert!(registry.register(Arc::new(ShapeDescriptor::singleton("Unit"))).is_err());
	}

	#[test]
	fn named_refs_resolve_or_fail_with_path() {
		let mut registry = ShapeRegistry::new();
		registry.register(Arc::new(ShapeDescriptor::singleton("Unit"))).expect("registers");

		assert!(ShapeRef::named("Unit").resolve_in(&registry, "a.b").is_ok());
		let error = ShapeRef::named("Ghost").resolve_in(&registry, "a.b").expect_err("unregistered fails");
		assert_eq!(error.path.as_ref(), "a.b");
	}
}
