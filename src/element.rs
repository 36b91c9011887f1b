//! The element model: immutable, acyclic descriptions of UI nodes.
//!
//! An [`Element`] never references a live node. Rendering is the only process that creates those.

use crate::event::EventHandler;
use core::{iter::FromIterator, slice};
use tracing::warn;

/// What kind of live node an [`Element`] turns into.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementType {
	/// A tagged element, like `"div"` or `"h1"`.
	Tag(String),
	/// The text sentinel: a plain text node whose data is [`Props::node_value`].
	Text,
}
impl ElementType {
	/// Type names that are parsed as [`ElementType::Text`] rather than as a tag.
	pub const TEXT_SENTINELS: [&'static str; 2] = ["text", "TEXT_ELEMENT"];

	#[must_use]
	pub fn parse(name: &str) -> Self {
		if Self::TEXT_SENTINELS.contains(&name) {
			Self::Text
		} else {
			Self::Tag(name.to_owned())
		}
	}

	/// The type name as it would appear in literal element data.
	#[must_use]
	pub fn as_str(&self) -> &str {
		match self {
			Self::Tag(tag) => tag,
			Self::Text => Self::TEXT_SENTINELS[0],
		}
	}
}
impl From<&str> for ElementType {
	fn from(name: &str) -> Self {
		Self::parse(name)
	}
}
impl From<String> for ElementType {
	fn from(name: String) -> Self {
		if Self::TEXT_SENTINELS.contains(&name.as_str()) {
			Self::Text
		} else {
			Self::Tag(name)
		}
	}
}

/// An immutable description of one UI node and its subtree.
///
/// `r#type` is [`None`] for malformed elements. The optimized renderer rejects those with an
/// [`InvalidElementError`](`crate::InvalidElementError`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
	pub r#type: Option<ElementType>,
	pub props: Props,
}
impl Element {
	#[must_use]
	pub fn new(r#type: impl Into<ElementType>) -> Self {
		Self {
			r#type: Some(r#type.into()),
			props: Props::default(),
		}
	}

	/// A text sentinel element carrying `value` as its node value.
	#[must_use]
	pub fn text(value: impl Into<String>) -> Self {
		Self {
			r#type: Some(ElementType::Text),
			props: Props {
				node_value: Some(value.into()),
				..Props::default()
			},
		}
	}

	/// An element without `type`. Only useful to exercise error paths.
	#[must_use]
	pub fn untyped(props: Props) -> Self {
		Self { r#type: None, props }
	}

	#[must_use]
	pub fn with_props(mut self, props: Props) -> Self {
		self.props = props;
		self
	}

	#[must_use]
	pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
		self.props.class_name = Some(class_name.into());
		self
	}

	/// Sets a style property, replacing an earlier value for the same name.
	#[must_use]
	pub fn style(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		upsert(&mut self.props.style, name.into(), value.into());
		self
	}

	/// Sets a generic attribute, replacing an earlier value for the same name.
	#[must_use]
	pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		upsert(&mut self.props.attributes, name.into(), value.into());
		self
	}

	/// Binds `handler` to the event named `event` (already without `on` prefix, e.g. `"click"`).
	#[must_use]
	pub fn on(mut self, event: &str, handler: impl Into<EventHandler>) -> Self {
		self.props.event_handlers.push((event.to_lowercase(), handler.into()));
		self
	}

	/// Appends a child to the children sequence.
	#[must_use]
	pub fn child(mut self, child: impl Into<Child>) -> Self {
		self.props.children.push(child.into());
		self
	}

	/// Replaces the children with a single, unwrapped child.
	#[must_use]
	pub fn single_child(mut self, child: impl Into<Child>) -> Self {
		self.props.children = Children::single(child);
		self
	}

	/// The tag name, if this is a tagged element.
	#[must_use]
	pub fn tag(&self) -> Option<&str> {
		match &self.r#type {
			Some(ElementType::Tag(tag)) => Some(tag),
			Some(ElementType::Text) | None => None,
		}
	}

	#[must_use]
	pub fn is_text(&self) -> bool {
		self.r#type == Some(ElementType::Text)
	}
}

/// The props of an [`Element`], already sorted into categories.
///
/// Reserved keys of literal element data map onto dedicated fields.
/// Everything else ends up in `attributes`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props {
	/// `className`, set as the `class` attribute.
	pub class_name: Option<String>,
	/// `style`, in declaration order. Names are usually camelCase, like `"textAlign"`.
	pub style: Vec<(String, String)>,
	/// `on<Event>` props as `(event name, handler)` pairs, with lower-cased event names.
	pub event_handlers: Vec<(String, EventHandler)>,
	pub attributes: Vec<(String, String)>,
	/// `nodeValue`, only read for text sentinel elements.
	pub node_value: Option<String>,
	pub children: Children,
}

/// The value of one raw prop entry, as accepted by [`Props::from_entries`].
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
	Scalar(String),
	Style(Vec<(String, String)>),
	Handler(EventHandler),
	Children(Children),
}
impl From<&str> for PropValue {
	fn from(value: &str) -> Self {
		Self::Scalar(value.to_owned())
	}
}
impl From<String> for PropValue {
	fn from(value: String) -> Self {
		Self::Scalar(value)
	}
}
impl From<bool> for PropValue {
	fn from(value: bool) -> Self {
		Self::Scalar(value.to_string())
	}
}
impl From<EventHandler> for PropValue {
	fn from(handler: EventHandler) -> Self {
		Self::Handler(handler)
	}
}
impl From<Children> for PropValue {
	fn from(children: Children) -> Self {
		Self::Children(children)
	}
}

impl Props {
	/// Sorts raw `(name, value)` entries into categories by inspecting each name once:
	///
	/// - `children`, `style`, `className` and `nodeValue` are reserved.
	/// - Handlers under `on<Event>` become event bindings for `<event>` (lower-cased).
	/// - Other scalars become attributes. This includes `on*` names with string values,
	///   which are inline handler attributes in HTML.
	///
	/// A scalar `style` is kept as the literal `style` attribute.
	/// A scalar `children` becomes a single text child.
	/// Entries that fit none of these are skipped with a warning.
	pub fn from_entries<K: Into<String>>(entries: impl IntoIterator<Item = (K, PropValue)>) -> Self {
		let mut props = Self::default();
		for (name, value) in entries {
			let name: String = name.into();
			match value {
				PropValue::Children(children) if name == "children" => props.children = children,
				PropValue::Scalar(text) if name == "children" => props.children = Children::single(text),
				PropValue::Style(style) if name == "style" => props.style = style,
				PropValue::Scalar(class_name) if name == "className" => props.class_name = Some(class_name),
				PropValue::Scalar(node_value) if name == "nodeValue" => props.node_value = Some(node_value),
				PropValue::Handler(handler) => match event_name(&name) {
					Some(event) => props.event_handlers.push((event, handler)),
					None => warn!("Skipping event handler under non-event prop {:?}.", name),
				},
				PropValue::Scalar(value) => upsert(&mut props.attributes, name, value),
				PropValue::Style(_) | PropValue::Children(_) => warn!("Skipping structured value of prop {:?}.", name),
			}
		}
		props
	}
}

/// `"onClick"` → `"click"`. [`None`] for names that aren't `on<Event>`.
fn event_name(prop: &str) -> Option<String> {
	match prop.strip_prefix("on") {
		Some(event) if !event.is_empty() => Some(event.to_lowercase()),
		_ => None,
	}
}

fn upsert(entries: &mut Vec<(String, String)>, name: String, value: String) {
	match entries.iter_mut().find(|(n, _)| *n == name) {
		Some((_, v)) => *v = value,
		None => entries.push((name, value)),
	}
}

/// The `children` prop: nothing, one unwrapped child or a sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Children {
	None,
	Single(Box<Child>),
	Many(Vec<Child>),
}
impl Default for Children {
	fn default() -> Self {
		Self::None
	}
}
impl Children {
	#[must_use]
	pub fn single(child: impl Into<Child>) -> Self {
		Self::Single(Box::new(child.into()))
	}

	/// The children as an ordered sequence, with a single child wrapped into a one-element slice.
	#[must_use]
	pub fn as_slice(&self) -> &[Child] {
		match self {
			Self::None => &[],
			Self::Single(child) => slice::from_ref(&**child),
			Self::Many(children) => children,
		}
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.as_slice().len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.as_slice().is_empty()
	}

	fn push(&mut self, child: Child) {
		match self {
			Self::None => *self = Self::Many(vec![child]),
			Self::Single(_) => {
				if let Self::Single(first) = core::mem::take(self) {
					*self = Self::Many(vec![*first, child])
				}
			}
			Self::Many(children) => children.push(child),
		}
	}
}
impl From<Vec<Child>> for Children {
	fn from(children: Vec<Child>) -> Self {
		Self::Many(children)
	}
}
impl<C: Into<Child>> FromIterator<C> for Children {
	fn from_iter<T: IntoIterator<Item = C>>(iter: T) -> Self {
		Self::Many(iter.into_iter().map(Into::into).collect())
	}
}

/// One entry of [`Children`]: a nested element or raw text.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
	Element(Element),
	Text(String),
}
impl From<Element> for Child {
	fn from(element: Element) -> Self {
		Self::Element(element)
	}
}
impl From<&str> for Child {
	fn from(text: &str) -> Self {
		Self::Text(text.to_owned())
	}
}
impl From<String> for Child {
	fn from(text: String) -> Self {
		Self::Text(text)
	}
}

macro_rules! integer_children {
	($($integer:ty),*$(,)?) => {$(
		impl From<$integer> for Child {
			fn from(value: $integer) -> Self {
				Self::Text(value.to_string())
			}
		}
	)*};
}
integer_children!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for Child {
	fn from(value: f64) -> Self {
		Self::Text(number_text(value))
	}
}
impl From<f32> for Child {
	fn from(value: f32) -> Self {
		// Widening first would print the binary error of the `f32`, like `0.10000000149011612`.
		let shortest: f64 = value.to_string().parse().unwrap_or_else(|_| value.into());
		Self::Text(number_text(shortest))
	}
}

/// Formats a number the way script text conversion does: `3.0` is `"3"`,
/// magnitudes from `1e21` up and below `1e-6` use exponent notation like `"1e+21"` and `"1e-7"`.
pub(crate) fn number_text(value: f64) -> String {
	if value.is_infinite() {
		String::from(if value.is_sign_positive() { "Infinity" } else { "-Infinity" })
	} else if value == 0.0 {
		"0".to_owned()
	} else if value.abs() >= 1e21 || value.abs() < 1e-6 {
		let scientific = format!("{:e}", value);
		match scientific.split_once('e') {
			Some((mantissa, exponent)) if !exponent.starts_with('-') => format!("{}e+{}", mantissa, exponent),
			_ => scientific,
		}
	} else {
		value.to_string()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn text_sentinels() {
		assert_eq!(ElementType::parse("text"), ElementType::Text);
		assert_eq!(ElementType::parse("TEXT_ELEMENT"), ElementType::Text);
		assert_eq!(ElementType::parse("div"), ElementType::Tag("div".to_owned()));
		assert_eq!(ElementType::from("TEXT_ELEMENT".to_owned()), ElementType::Text);
	}

	#[test]
	fn entries_are_categorized_once() {
		let handler = EventHandler::new(|_| ());
		let props = Props::from_entries(vec![
			("className", PropValue::from("container")),
			("style", PropValue::Style(vec![("color".to_owned(), "red".to_owned())])),
			("onClick", PropValue::from(handler.clone())),
			("onclick", PropValue::from("alert(1)")),
			("href", PropValue::from("https://x.test")),
			("hidden", PropValue::from(true)),
			("children", PropValue::from("Hi")),
		]);

		assert_eq!(props.class_name.as_deref(), Some("container"));
		assert_eq!(props.style, vec![("color".to_owned(), "red".to_owned())]);
		assert_eq!(props.event_handlers, vec![("click".to_owned(), handler)]);
		assert_eq!(
			props.attributes,
			vec![
				("onclick".to_owned(), "alert(1)".to_owned()),
				("href".to_owned(), "https://x.test".to_owned()),
				("hidden".to_owned(), "true".to_owned()),
			]
		);
		assert_eq!(props.children, Children::single("Hi"));
	}

	#[test]
	fn misplaced_entries_are_skipped() {
		let props = Props::from_entries(vec![
			("click", PropValue::from(EventHandler::new(|_| ()))),
			("on", PropValue::from(EventHandler::new(|_| ()))),
			("title", PropValue::Children(Children::None)),
		]);
		assert_eq!(props, Props::default());
	}

	#[test]
	fn scalar_style_stays_an_attribute() {
		let props = Props::from_entries(vec![("style", PropValue::from("color: red"))]);
		assert!(props.style.is_empty());
		assert_eq!(props.attributes, vec![("style".to_owned(), "color: red".to_owned())]);
	}

	#[test]
	fn single_child_normalizes_to_one_element_slice() {
		let h1 = Element::new("h1");
		let single = Children::single(h1.clone());
		let many = Children::from(vec![Child::Element(h1)]);
		assert_eq!(single.as_slice(), many.as_slice());
		assert!(Children::None.as_slice().is_empty());
	}

	#[test]
	fn child_appends_after_single_child() {
		let element = Element::new("p").single_child("a").child("b");
		assert_eq!(element.props.children, Children::Many(vec![Child::from("a"), Child::from("b")]));
	}

	#[test]
	fn builder_replaces_duplicate_keys() {
		let element = Element::new("a").attribute("href", "1").attribute("href", "2").style("color", "red").style("color", "blue");
		assert_eq!(element.props.attributes, vec![("href".to_owned(), "2".to_owned())]);
		assert_eq!(element.props.style, vec![("color".to_owned(), "blue".to_owned())]);
	}

	#[test]
	fn numbers_become_text() {
		assert_eq!(Child::from(3.0), Child::from("3"));
		assert_eq!(Child::from(2.5_f32), Child::from("2.5"));
		assert_eq!(Child::from(-7_i32), Child::from("-7"));
		assert_eq!(Child::from(f64::INFINITY), Child::from("Infinity"));
		assert_eq!(Child::from(-0.0), Child::from("0"));
		assert_eq!(Child::from(0.1_f32), Child::from("0.1"));
		assert_eq!(Child::from(1e21), Child::from("1e+21"));
		assert_eq!(Child::from(-1.5e300), Child::from("-1.5e+300"));
		assert_eq!(Child::from(1e-7), Child::from("1e-7"));
		assert_eq!(Child::from(0.000_001), Child::from("0.000001"));
		assert_eq!(Child::from(123_456_789_012_345_680_000.0), Child::from("123456789012345680000"));
		assert_eq!(Child::from(f64::NAN), Child::from("NaN"));
	}

	#[test]
	fn text_element() {
		let text = Element::text("plain");
		assert!(text.is_text());
		assert_eq!(text.tag(), None);
		assert_eq!(text.props.node_value.as_deref(), Some("plain"));
	}
}
