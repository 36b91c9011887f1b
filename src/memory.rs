//! An in-memory UI runtime.
//!
//! [`MemoryDom`] is an arena of nodes rooted at a `<body>` element.
//! It validates names and tree operations roughly the way a browser document does,
//! which makes it usable as a stand-in wherever no real document is available.

use crate::{
	dom::{Dom, Inspect, LiveNode},
	event::{Event, EventHandler},
	style,
};
use core::fmt::Write as _;
use thiserror::Error;
use tracing::{instrument, trace};

/// A handle to a node of one specific [`MemoryDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
	#[error("Invalid tag name {0:?}")]
	InvalidTagName(String),

	#[error("Invalid attribute name {0:?}")]
	InvalidAttributeName(String),

	#[error("{0:?} is not an element")]
	NotAnElement(NodeId),

	#[error("{0:?} does not belong to this document")]
	UnknownNode(NodeId),

	#[error("Can't append {child:?} to {parent:?}")]
	HierarchyRequest { parent: NodeId, child: NodeId },
}

#[derive(Debug)]
enum NodeData {
	Element {
		tag: String,
		/// Includes `style`, which mirrors `style_declarations`.
		attributes: Vec<(String, String)>,
		style_declarations: Vec<(String, String)>,
	},
	Text(String),
}

#[derive(Debug)]
struct Slot {
	data: NodeData,
	parent: Option<NodeId>,
	children: Vec<NodeId>,
	listeners: Vec<(String, EventHandler)>,
}

#[derive(Debug)]
pub struct MemoryDom {
	slots: Vec<Slot>,
	document_listeners: Vec<(String, EventHandler)>,
	body: NodeId,
}

impl Default for MemoryDom {
	fn default() -> Self {
		Self::new()
	}
}

const VOID_ELEMENTS: &[&str] = &["area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr"];

impl MemoryDom {
	#[must_use]
	pub fn new() -> Self {
		let mut dom = Self {
			slots: Vec::new(),
			document_listeners: Vec::new(),
			body: NodeId(0),
		};
		dom.body = dom.insert(NodeData::Element {
			tag: "body".to_owned(),
			attributes: Vec::new(),
			style_declarations: Vec::new(),
		});
		dom
	}

	fn insert(&mut self, data: NodeData) -> NodeId {
		self.slots.push(Slot {
			data,
			parent: None,
			children: Vec::new(),
			listeners: Vec::new(),
		});
		NodeId(self.slots.len() - 1)
	}

	fn slot(&self, node: NodeId) -> Result<&Slot, HostError> {
		self.slots.get(node.0).ok_or(HostError::UnknownNode(node))
	}

	fn slot_mut(&mut self, node: NodeId) -> Result<&mut Slot, HostError> {
		self.slots.get_mut(node.0).ok_or(HostError::UnknownNode(node))
	}

	fn element_mut(&mut self, node: NodeId) -> Result<(&mut Vec<(String, String)>, &mut Vec<(String, String)>), HostError> {
		match &mut self.slot_mut(node)?.data {
			NodeData::Element {
				attributes, style_declarations, ..
			} => Ok((attributes, style_declarations)),
			NodeData::Text(_) => Err(HostError::NotAnElement(node)),
		}
	}

	/// The `<body>` element every document starts out with.
	#[must_use]
	pub fn body(&self) -> NodeId {
		self.body
	}

	/// Number of nodes ever created in this document, including `<body>` and detached nodes.
	#[must_use]
	pub fn node_count(&self) -> usize {
		self.slots.len()
	}

	/// Finds the first element attached under `<body>` whose `id` attribute is `id`, in tree order.
	#[must_use]
	pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
		let mut stack = vec![self.body];
		while let Some(node) = stack.pop() {
			if self.attribute(node, "id") == Some(id) {
				return Some(node);
			}
			if let Ok(slot) = self.slot(node) {
				stack.extend(slot.children.iter().rev());
			}
		}
		None
	}

	/// The lower-case tag name, or [`None`] for text nodes.
	#[must_use]
	pub fn tag_name(&self, node: NodeId) -> Option<&str> {
		match &self.slot(node).ok()?.data {
			NodeData::Element { tag, .. } => Some(tag),
			NodeData::Text(_) => None,
		}
	}

	/// The data of a text node.
	#[must_use]
	pub fn text(&self, node: NodeId) -> Option<&str> {
		match &self.slot(node).ok()?.data {
			NodeData::Text(text) => Some(text),
			NodeData::Element { .. } => None,
		}
	}

	#[must_use]
	pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
		match &self.slot(node).ok()?.data {
			NodeData::Element { attributes, .. } => attributes.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str()),
			NodeData::Text(_) => None,
		}
	}

	/// Reads a style property by camelCase or hyphenated name.
	#[must_use]
	pub fn style_property(&self, node: NodeId, name: &str) -> Option<&str> {
		let name = style::to_kebab_case(name);
		match &self.slot(node).ok()?.data {
			NodeData::Element { style_declarations, .. } => style_declarations.iter().find(|(n, _)| *n == name).map(|(_, v)| v.as_str()),
			NodeData::Text(_) => None,
		}
	}

	/// All style declarations of `node`, hyphenated, in the order they were first set.
	#[must_use]
	pub fn style_declarations(&self, node: NodeId) -> &[(String, String)] {
		match self.slot(node).map(|slot| &slot.data) {
			Ok(NodeData::Element { style_declarations, .. }) => style_declarations,
			Ok(NodeData::Text(_)) | Err(_) => &[],
		}
	}

	#[must_use]
	pub fn child_nodes(&self, node: NodeId) -> &[NodeId] {
		self.slot(node).map_or(&[], |slot| &slot.children)
	}

	#[must_use]
	pub fn parent(&self, node: NodeId) -> Option<NodeId> {
		self.slot(node).ok()?.parent
	}

	/// Nodes other than `<body>` that have no parent, in creation order.
	///
	/// After a failed render, this includes the root of the subtree that was under construction.
	pub fn detached_roots(&self) -> impl Iterator<Item = NodeId> + '_ {
		let body = self.body;
		self.slots
			.iter()
			.enumerate()
			.filter(move |(i, slot)| slot.parent.is_none() && *i != body.0)
			.map(|(i, _)| NodeId(i))
	}

	/// The concatenated data of all descendant text nodes, in tree order.
	#[must_use]
	pub fn text_content(&self, node: NodeId) -> String {
		let mut text = String::new();
		self.collect_text(node, &mut text);
		text
	}

	fn collect_text(&self, node: NodeId, text: &mut String) {
		if let Ok(slot) = self.slot(node) {
			match &slot.data {
				NodeData::Text(data) => text.push_str(data),
				NodeData::Element { .. } => {
					for &child in &slot.children {
						self.collect_text(child, text)
					}
				}
			}
		}
	}

	/// Number of listeners attached to `node` itself.
	#[must_use]
	pub fn listener_count(&self, node: NodeId) -> usize {
		self.slot(node).map_or(0, |slot| slot.listeners.len())
	}

	#[must_use]
	pub fn document_listener_count(&self) -> usize {
		self.document_listeners.len()
	}

	/// Dispatches an event named `event` at `target`.
	///
	/// Listeners run on the target first, then on each ancestor, then on the document.
	/// Returns the number of handlers that ran.
	#[instrument(skip(self))]
	pub fn dispatch(&self, target: NodeId, event: &str) -> Result<usize, HostError> {
		let mut handlers = Vec::new();
		let mut current = Some(target);
		while let Some(node) = current {
			let slot = self.slot(node)?;
			handlers.extend(slot.listeners.iter().filter(|(name, _)| name == event).map(|(_, handler)| handler.clone()));
			current = slot.parent;
		}
		handlers.extend(self.document_listeners.iter().filter(|(name, _)| name == event).map(|(_, handler)| handler.clone()));

		let event = Event::new(event);
		for handler in &handlers {
			handler.call(&event)
		}
		trace!("Ran {} handler(s).", handlers.len());
		Ok(handlers.len())
	}

	/// Serializes `node` and its subtree as HTML.
	#[must_use]
	pub fn outer_html(&self, node: NodeId) -> String {
		let mut html = String::new();
		self.write_html(node, &mut html);
		html
	}

	/// Serializes the children of `node` as HTML.
	#[must_use]
	pub fn inner_html(&self, node: NodeId) -> String {
		let mut html = String::new();
		for &child in self.child_nodes(node) {
			self.write_html(child, &mut html)
		}
		html
	}

	fn write_html(&self, node: NodeId, html: &mut String) {
		let slot = match self.slot(node) {
			Ok(slot) => slot,
			Err(_) => return,
		};
		match &slot.data {
			NodeData::Text(text) => escape(text, false, html),
			NodeData::Element { tag, attributes, .. } => {
				html.push('<');
				html.push_str(tag);
				for (name, value) in attributes {
					let _ = write!(html, " {}=\"", name);
					escape(value, true, html);
					html.push('"');
				}
				html.push('>');
				if VOID_ELEMENTS.contains(&tag.as_str()) && slot.children.is_empty() {
					return;
				}
				for &child in &slot.children {
					self.write_html(child, html)
				}
				let _ = write!(html, "</{}>", tag);
			}
		}
	}
}

fn escape(text: &str, attribute: bool, html: &mut String) {
	for c in text.chars() {
		match c {
			'&' => html.push_str("&amp;"),
			'"' if attribute => html.push_str("&quot;"),
			'<' if !attribute => html.push_str("&lt;"),
			'>' if !attribute => html.push_str("&gt;"),
			'\u{A0}' => html.push_str("&nbsp;"),
			c => html.push(c),
		}
	}
}

fn is_valid_tag_name(name: &str) -> bool {
	name.starts_with(|c: char| c.is_ascii_alphabetic()) && !name.contains(|c: char| c.is_whitespace() || c.is_control() || matches!(c, '/' | '>' | '<' | '"' | '\'' | '='))
}

fn is_valid_attribute_name(name: &str) -> bool {
	!name.is_empty() && !name.contains(|c: char| c.is_whitespace() || c.is_control() || matches!(c, '/' | '>' | '<' | '"' | '\'' | '='))
}

impl Dom for MemoryDom {
	type Node = NodeId;
	type Error = HostError;

	fn create_element(&mut self, tag: &str) -> Result<NodeId, HostError> {
		if !is_valid_tag_name(tag) {
			return Err(HostError::InvalidTagName(tag.to_owned()));
		}
		Ok(self.insert(NodeData::Element {
			tag: tag.to_ascii_lowercase(),
			attributes: Vec::new(),
			style_declarations: Vec::new(),
		}))
	}

	fn create_text_node(&mut self, data: &str) -> NodeId {
		self.insert(NodeData::Text(data.to_owned()))
	}

	fn set_class_name(&mut self, node: &NodeId, class_name: &str) -> Result<(), HostError> {
		self.set_attribute(node, "class", class_name)
	}

	fn set_style_property(&mut self, node: &NodeId, name: &str, value: &str) -> Result<(), HostError> {
		let (attributes, style_declarations) = self.element_mut(*node)?;
		let name = style::to_kebab_case(name);
		if !style::is_valid_property_name(&name) {
			trace!("Ignoring unsupported style property {:?}.", name);
			return Ok(());
		}

		let existing = style_declarations.iter().position(|(n, _)| *n == name);
		match (existing, value.is_empty()) {
			(Some(i), true) => drop(style_declarations.remove(i)),
			(Some(i), false) => style_declarations[i].1 = value.to_owned(),
			(None, true) => (),
			(None, false) => style_declarations.push((name.into_owned(), value.to_owned())),
		}
		sync_style_attribute(attributes, style_declarations);
		Ok(())
	}

	fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) -> Result<(), HostError> {
		if !is_valid_attribute_name(name) {
			return Err(HostError::InvalidAttributeName(name.to_owned()));
		}
		let (attributes, style_declarations) = self.element_mut(*node)?;
		let name = name.to_ascii_lowercase();
		if name == "style" {
			*style_declarations = style::parse_declarations(value)
				.into_iter()
				.filter(|(name, _)| style::is_valid_property_name(name))
				.collect();
			sync_style_attribute(attributes, style_declarations);
			return Ok(());
		}
		match attributes.iter_mut().find(|(n, _)| *n == name) {
			Some((_, v)) => *v = value.to_owned(),
			None => attributes.push((name, value.to_owned())),
		}
		Ok(())
	}

	fn add_event_listener(&mut self, node: &NodeId, event: &str, handler: &EventHandler) -> Result<(), HostError> {
		self.slot_mut(*node)?.listeners.push((event.to_owned(), handler.clone()));
		Ok(())
	}

	fn add_document_event_listener(&mut self, event: &str, handler: &EventHandler) -> Result<(), HostError> {
		self.document_listeners.push((event.to_owned(), handler.clone()));
		Ok(())
	}

	fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), HostError> {
		let (parent, child) = (*parent, *child);
		let hierarchy_request = HostError::HierarchyRequest { parent, child };
		if let NodeData::Text(_) = self.slot(parent)?.data {
			return Err(hierarchy_request);
		}
		self.slot(child)?;

		let mut ancestor = Some(parent);
		while let Some(node) = ancestor {
			if node == child {
				return Err(hierarchy_request);
			}
			ancestor = self.slot(node)?.parent;
		}

		if let Some(previous) = self.slot(child)?.parent {
			self.slot_mut(previous)?.children.retain(|&c| c != child);
		}
		self.slot_mut(child)?.parent = Some(parent);
		self.slot_mut(parent)?.children.push(child);
		Ok(())
	}
}

fn sync_style_attribute(attributes: &mut Vec<(String, String)>, style_declarations: &[(String, String)]) {
	let position = attributes.iter().position(|(n, _)| n == "style");
	match (position, style_declarations.is_empty()) {
		(Some(i), true) => drop(attributes.remove(i)),
		(Some(i), false) => attributes[i].1 = style::serialize_declarations(style_declarations),
		(None, true) => (),
		(None, false) => attributes.push(("style".to_owned(), style::serialize_declarations(style_declarations))),
	}
}

impl Inspect for MemoryDom {
	fn node_kind(&self, node: &NodeId) -> LiveNode {
		match self.slot(*node).map(|slot| &slot.data) {
			Ok(NodeData::Element { tag, attributes, .. }) => LiveNode::Element {
				tag: tag.clone(),
				attributes: attributes.clone(),
			},
			Ok(NodeData::Text(text)) => LiveNode::Text(text.clone()),
			Err(_) => LiveNode::Other,
		}
	}

	fn child_nodes(&self, node: &NodeId) -> Vec<NodeId> {
		MemoryDom::child_nodes(self, *node).to_vec()
	}
}
