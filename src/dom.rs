//! The seam between the renderer and a UI runtime.
//!
//! [`Dom`] is the minimal set of write primitives mounting needs.
//! [`Inspect`] reads live nodes back, see [`load`](`crate::load`).

use crate::event::EventHandler;
use core::fmt::Debug;

/// A UI runtime that owns live nodes.
///
/// Implementations report failures through their own [`Dom::Error`], which the renderer never translates.
pub trait Dom {
	/// A handle to a live node. Cloning it must not clone the node.
	type Node: Clone + Debug;
	type Error: std::error::Error + 'static;

	fn create_element(&mut self, tag: &str) -> Result<Self::Node, Self::Error>;
	fn create_text_node(&mut self, data: &str) -> Self::Node;

	fn set_class_name(&mut self, node: &Self::Node, class_name: &str) -> Result<(), Self::Error>;

	/// `name` may be camelCase or hyphenated. Runtimes silently ignore names they don't support.
	fn set_style_property(&mut self, node: &Self::Node, name: &str, value: &str) -> Result<(), Self::Error>;

	fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str) -> Result<(), Self::Error>;

	fn add_event_listener(&mut self, node: &Self::Node, event: &str, handler: &EventHandler) -> Result<(), Self::Error>;

	/// Attaches `handler` to the document instead of to a specific node.
	fn add_document_event_listener(&mut self, event: &str, handler: &EventHandler) -> Result<(), Self::Error>;

	/// Appends `child` as last child of `parent`, moving it if it is already attached elsewhere.
	fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<(), Self::Error>;
}

/// What a live node looks like from the outside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveNode {
	Element { tag: String, attributes: Vec<(String, String)> },
	Text(String),
	/// Comments, processing instructions and the like.
	Other,
}

/// Read access to live nodes.
pub trait Inspect: Dom {
	fn node_kind(&self, node: &Self::Node) -> LiveNode;
	fn child_nodes(&self, node: &Self::Node) -> Vec<Self::Node>;
}
