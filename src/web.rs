//! The browser UI runtime, backed by [`web_sys`].

use crate::{
	closure_map::ClosureMap,
	dom::{Dom, Inspect, LiveNode},
	event::EventHandler,
	style,
};
use core::fmt::{self, Display, Formatter};
use tracing::{instrument, trace};
use wasm_bindgen::{JsCast, JsValue};

/// An exception thrown by a DOM API, passed through as-is.
#[derive(Debug, Clone)]
pub struct JsError(pub JsValue);
impl Display for JsError {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self.0.as_string() {
			Some(message) => f.write_str(&message),
			None => write!(f, "{:?}", self.0),
		}
	}
}
impl std::error::Error for JsError {}

/// Mounts into a [`web_sys::Document`].
///
/// Event listeners stay callable for as long as this instance lives.
/// Once it's dropped, listeners it added throw errors into JavaScript.
#[derive(Debug)]
pub struct WebDom {
	document: web_sys::Document,
	closures: ClosureMap,
}
impl WebDom {
	#[must_use]
	#[instrument]
	pub fn new(document: web_sys::Document) -> Self {
		Self {
			document,
			closures: ClosureMap::default(),
		}
	}

	#[must_use]
	pub fn document(&self) -> &web_sys::Document {
		&self.document
	}

	/// Number of distinct handlers that were wrapped for JavaScript so far.
	#[must_use]
	pub fn published_handler_count(&self) -> usize {
		self.closures.len()
	}
}

fn as_element(node: &web_sys::Node) -> Result<&web_sys::Element, JsError> {
	node.dyn_ref::<web_sys::Element>()
		.ok_or_else(|| JsError(JsValue::from_str(&format!("Expected an element but found {:?}", node))))
}

impl Dom for WebDom {
	type Node = web_sys::Node;
	type Error = JsError;

	fn create_element(&mut self, tag: &str) -> Result<web_sys::Node, JsError> {
		self.document.create_element(tag).map(Into::into).map_err(JsError)
	}

	fn create_text_node(&mut self, data: &str) -> web_sys::Node {
		self.document.create_text_node(data).into()
	}

	fn set_class_name(&mut self, node: &web_sys::Node, class_name: &str) -> Result<(), JsError> {
		as_element(node)?.set_class_name(class_name);
		Ok(())
	}

	fn set_style_property(&mut self, node: &web_sys::Node, name: &str, value: &str) -> Result<(), JsError> {
		let declaration = if let Some(html_element) = node.dyn_ref::<web_sys::HtmlElement>() {
			html_element.style()
		} else if let Some(svg_element) = node.dyn_ref::<web_sys::SvgElement>() {
			svg_element.style()
		} else {
			trace!("Ignoring style property {:?} of unstyled node.", name);
			return Ok(());
		};
		declaration.set_property(&style::to_kebab_case(name), value).map_err(JsError)
	}

	fn set_attribute(&mut self, node: &web_sys::Node, name: &str, value: &str) -> Result<(), JsError> {
		as_element(node)?.set_attribute(name, value).map_err(JsError)
	}

	fn add_event_listener(&mut self, node: &web_sys::Node, event: &str, handler: &EventHandler) -> Result<(), JsError> {
		node.add_event_listener_with_callback(event, self.closures.publish(handler)).map_err(JsError)
	}

	fn add_document_event_listener(&mut self, event: &str, handler: &EventHandler) -> Result<(), JsError> {
		self.document.add_event_listener_with_callback(event, self.closures.publish(handler)).map_err(JsError)
	}

	fn append_child(&mut self, parent: &web_sys::Node, child: &web_sys::Node) -> Result<(), JsError> {
		parent.append_child(child).map(drop).map_err(JsError)
	}
}

impl Inspect for WebDom {
	fn node_kind(&self, node: &web_sys::Node) -> LiveNode {
		if let Some(element) = node.dyn_ref::<web_sys::Element>() {
			let attributes = element.attributes();
			LiveNode::Element {
				tag: element.local_name(),
				attributes: (0..attributes.length())
					.filter_map(|i| attributes.item(i))
					.map(|attribute| (attribute.local_name(), attribute.value()))
					.collect(),
			}
		} else if let Some(text) = node.dyn_ref::<web_sys::Text>() {
			LiveNode::Text(text.data())
		} else {
			LiveNode::Other
		}
	}

	fn child_nodes(&self, node: &web_sys::Node) -> Vec<web_sys::Node> {
		let child_nodes = node.child_nodes();
		(0..child_nodes.length()).filter_map(|i| child_nodes.item(i)).collect()
	}
}
