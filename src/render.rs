use crate::{
	dom::Dom,
	element::{Child, Children, Element, ElementType},
	error::{InvalidElementError, RenderError},
};
use tracing::{instrument, level_filters::STATIC_MAX_LEVEL, trace, trace_span, warn, Level};

/// Where event handlers declared on an element are attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerTarget {
	/// On the live node created for the declaring element.
	Node,
	/// On the document, regardless of which element declared the handler.
	///
	/// This reproduces legacy behaviour where every handler fires for matching events anywhere in the document.
	Document,
}
impl Default for ListenerTarget {
	fn default() -> Self {
		Self::Node
	}
}

/// Mounts element trees into live containers.
///
/// Each call is a fresh, total mount: nothing is diffed against earlier renders, and no state is kept between calls.
///
/// # Failure
///
/// Errors abort the render immediately and are returned as-is; nothing is rolled back.
/// A node is appended to its container only once its whole subtree was built,
/// so on failure the subtree under construction stays detached while its already created nodes remain with the UI runtime.
///
/// # Concurrency
///
/// Rendering borrows the UI runtime mutably, so renders into the same container can't overlap.
#[derive(Debug, Clone)]
pub struct Renderer {
	depth_limit: usize,
	listener_target: ListenerTarget,
}
impl Default for Renderer {
	fn default() -> Self {
		Self::new()
	}
}
impl Renderer {
	pub const DEFAULT_DEPTH_LIMIT: usize = 512;

	#[must_use]
	pub fn new() -> Self {
		Self {
			depth_limit: Self::DEFAULT_DEPTH_LIMIT,
			listener_target: ListenerTarget::default(),
		}
	}

	/// Sets the maximum element nesting depth. The render root counts as depth 1; text doesn't count.
	#[must_use]
	pub fn with_depth_limit(mut self, depth_limit: usize) -> Self {
		self.depth_limit = depth_limit;
		self
	}

	#[must_use]
	pub fn with_listener_target(mut self, listener_target: ListenerTarget) -> Self {
		self.listener_target = listener_target;
		self
	}

	#[must_use]
	pub fn depth_limit(&self) -> usize {
		self.depth_limit
	}

	#[must_use]
	pub fn listener_target(&self) -> ListenerTarget {
		self.listener_target
	}

	/// Materializes `element` and appends it to `container`.
	///
	/// # Errors
	///
	/// - [`RenderError::InvalidElement`] if `element` or any descendant element lacks a usable `type`.
	///   This is checked before the respective node is created.
	/// - [`RenderError::DepthLimitReached`] if the tree nests deeper than [`Renderer::depth_limit`].
	/// - [`RenderError::Host`] for any error of the UI runtime.
	#[instrument(skip(dom, element))]
	pub fn render<D: Dom>(&self, dom: &mut D, element: &Element, container: &D::Node) -> Result<(), RenderError<D::Error>> {
		let mut path = Vec::new();
		self.render_element(dom, element, container, &mut path, self.depth_limit)
	}

	/// Like [`Renderer::render`], but also accepts a text primitive, which is appended as text node.
	///
	/// # Errors
	///
	/// See [`Renderer::render`].
	#[instrument(skip(dom, child))]
	pub fn render_child<D: Dom>(&self, dom: &mut D, child: &Child, container: &D::Node) -> Result<(), RenderError<D::Error>> {
		let mut path = Vec::new();
		self.render_child_at(dom, child, container, &mut path, self.depth_limit)
	}

	fn render_child_at<D: Dom>(&self, dom: &mut D, child: &Child, container: &D::Node, path: &mut Vec<usize>, depth_limit: usize) -> Result<(), RenderError<D::Error>> {
		match child {
			Child::Element(element) => self.render_element(dom, element, container, path, depth_limit),
			Child::Text(text) => {
				let span = trace_span!("Creating text node", text = text_field(text));
				let _enter = span.enter();
				let text_node = dom.create_text_node(text);
				dom.append_child(container, &text_node).map_err(RenderError::Host)
			}
		}
	}

	fn render_element<D: Dom>(&self, dom: &mut D, element: &Element, container: &D::Node, path: &mut Vec<usize>, depth_limit: usize) -> Result<(), RenderError<D::Error>> {
		if depth_limit == 0 {
			return Err(RenderError::DepthLimitReached { path: path.clone() });
		}

		let tag = match &element.r#type {
			Some(ElementType::Tag(tag)) if !tag.is_empty() => tag,
			Some(ElementType::Tag(_)) | None => return Err(InvalidElementError { path: path.clone() }.into()),
			Some(ElementType::Text) => {
				let node_value = element.props.node_value.as_deref().unwrap_or_default();
				let span = trace_span!("Creating text sentinel", text = text_field(node_value));
				let _enter = span.enter();
				let text_node = dom.create_text_node(node_value);
				return dom.append_child(container, &text_node).map_err(RenderError::Host);
			}
		};

		let span = trace_span!("Creating element", tag = tag.as_str(), ?path);
		let _enter = span.enter();
		let props = &element.props;
		let node = dom.create_element(tag).map_err(RenderError::Host)?;

		for (name, value) in &props.style {
			trace!(name = name.as_str(), value = text_field(value), "Setting style property");
			dom.set_style_property(&node, name, value).map_err(RenderError::Host)?;
		}

		for (event, handler) in &props.event_handlers {
			let attached = match self.listener_target {
				ListenerTarget::Node => dom.add_event_listener(&node, event, handler),
				ListenerTarget::Document => {
					trace!("Attaching {:?} handler to the document.", event);
					dom.add_document_event_listener(event, handler)
				}
			};
			attached.map_err(RenderError::Host)?;
		}

		if let Some(class_name) = &props.class_name {
			if STATIC_MAX_LEVEL >= Level::WARN && props.attributes.iter().any(|(name, _)| name.eq_ignore_ascii_case("class")) {
				warn!("<{}> has both `className` and a `class` attribute. The attribute wins.", tag);
			}
			dom.set_class_name(&node, class_name).map_err(RenderError::Host)?;
		}

		for (name, value) in &props.attributes {
			trace!(name = name.as_str(), value = text_field(value), "Setting attribute");
			dom.set_attribute(&node, name, value).map_err(RenderError::Host)?;
		}

		if props.node_value.is_some() {
			trace!("Ignoring `nodeValue` of <{}>.", tag);
		}

		for (i, child) in props.children.as_slice().iter().enumerate() {
			path.push(i);
			self.render_child_at(dom, child, &node, path, depth_limit - 1)?;
			path.pop();
		}

		dom.append_child(container, &node).map_err(RenderError::Host)
	}

	/// The naive variant: mounts `element` the way the first hand-rolled renderer did.
	///
	/// # Limitations
	///
	/// These are kept on purpose, [`Renderer::render`] doesn't have them:
	///
	/// - Only `className`, `style`, `href` and `target` are applied. Other attributes and all event handlers are ignored.
	///   Empty `className`, `href` and `target` values are skipped.
	/// - `type` isn't validated. A missing type is passed to the UI runtime as empty tag name
	///   and the text sentinel creates an element named `text`.
	/// - `children` is walked as a mapping rather than normalized:
	///   a single text child is appended one character at a time,
	///   and walking a single element child fails after appending its type name as text,
	///   because its props are mounted as an element without type, which UI runtimes reject.
	///
	/// # Errors
	///
	/// [`RenderError::Host`] for any error of the UI runtime, [`RenderError::DepthLimitReached`] past the depth limit.
	#[instrument(skip(dom, element))]
	pub fn render_naive<D: Dom>(&self, dom: &mut D, element: &Element, container: &D::Node) -> Result<(), RenderError<D::Error>> {
		let mut path = Vec::new();
		self.render_naive_element(dom, element, container, &mut path, self.depth_limit)
	}

	fn render_naive_element<D: Dom>(&self, dom: &mut D, element: &Element, container: &D::Node, path: &mut Vec<usize>, depth_limit: usize) -> Result<(), RenderError<D::Error>> {
		if depth_limit == 0 {
			return Err(RenderError::DepthLimitReached { path: path.clone() });
		}

		let tag = element.r#type.as_ref().map_or("", ElementType::as_str);
		let span = trace_span!("Creating element (naive)", tag, ?path);
		let _enter = span.enter();
		let props = &element.props;
		let node = dom.create_element(tag).map_err(RenderError::Host)?;

		if let Some(class_name) = props.class_name.as_deref().filter(|class_name| !class_name.is_empty()) {
			dom.set_class_name(&node, class_name).map_err(RenderError::Host)?;
		}

		for (name, value) in &props.style {
			dom.set_style_property(&node, name, value).map_err(RenderError::Host)?;
		}

		for known in &["href", "target"] {
			if let Some((name, value)) = props.attributes.iter().find(|(name, value)| name == known && !value.is_empty()) {
				dom.set_attribute(&node, name, value).map_err(RenderError::Host)?;
			}
		}

		match &props.children {
			Children::None => (),
			Children::Many(children) => {
				for (i, child) in children.iter().enumerate() {
					path.push(i);
					match child {
						Child::Element(child) => self.render_naive_element(dom, child, &node, path, depth_limit - 1)?,
						Child::Text(text) => append_text(dom, &node, text)?,
					}
					path.pop();
				}
			}
			Children::Single(child) => match &**child {
				Child::Text(text) => {
					let mut buffer = [0; 4];
					for c in text.chars() {
						append_text(dom, &node, c.encode_utf8(&mut buffer))?;
					}
				}
				Child::Element(child) => {
					trace!("Walking single element child as mapping.");
					if let Some(r#type) = &child.r#type {
						append_text(dom, &node, r#type.as_str())?;
					}
					let props_as_element = Element::untyped(child.props.clone());
					self.render_naive_element(dom, &props_as_element, &node, path, depth_limit - 1)?;
				}
			},
		}

		dom.append_child(container, &node).map_err(RenderError::Host)
	}
}

fn append_text<D: Dom>(dom: &mut D, parent: &D::Node, text: &str) -> Result<(), RenderError<D::Error>> {
	let text_node = dom.create_text_node(text);
	dom.append_child(parent, &text_node).map_err(RenderError::Host)
}

/// Page content only shows up in logs with the `dangerous-logging` feature.
fn text_field(text: &str) -> &str {
	if cfg!(feature = "dangerous-logging") {
		text
	} else {
		"<redacted>"
	}
}

/// Mounts `element` into `container` with a default [`Renderer`].
///
/// # Errors
///
/// See [`Renderer::render`].
pub fn render<D: Dom>(dom: &mut D, element: &Element, container: &D::Node) -> Result<(), RenderError<D::Error>> {
	Renderer::default().render(dom, element, container)
}

/// Mounts `element` into `container` with a default [`Renderer`]'s naive variant.
///
/// # Errors
///
/// See [`Renderer::render_naive`].
pub fn render_naive<D: Dom>(dom: &mut D, element: &Element, container: &D::Node) -> Result<(), RenderError<D::Error>> {
	Renderer::default().render_naive(dom, element, container)
}
