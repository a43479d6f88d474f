//! Schema-driven decoding of configuration trees into typed values.
//!
//! The caller supplies a configuration tree produced by an external
//! loader (see [`from_json`]) and a [`ShapeDescriptor`] for the target
//! type; [`decode`] walks both in lock-step and returns a fully
//! populated [`Value`] or a path-annotated [`DecodeError`].

mod decode;
mod error;
mod json;
mod node;
mod primitive;
mod reader;
mod registry;
mod scalar;
mod shape;
mod tag;
mod value;

/// Engine entry point.
pub use decode::decode;
/// Error and result aliases.
pub use error::{DecodeError, Result};
/// JSON loader adapter.
pub use json::{from_json, from_json_str};
/// Configuration tree node types.
pub use node::{ConfigNode, NodeValue};
/// Descriptor registry used for named and polymorphic shapes.
pub use registry::ShapeRegistry;
/// Scalar leaf values and their coercions.
pub use scalar::Scalar;
/// Shape descriptor types.
pub use shape::{FieldShape, PrimitiveKind, ShapeDescriptor, ShapeKind, ShapeRef};
/// Decoded runtime value type.
pub use value::Value;
