//! Element trees from JSON literals shaped like `{"type": "div", "props": {"children": [...]}}`.

use crate::element::{number_text, Child, Children, Element, ElementType, PropValue, Props};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsonError {
	#[error("Expected an element object but found {0}")]
	NotAnElement(&'static str),

	#[error("Element `type` must be a string but is {0}")]
	InvalidType(&'static str),

	#[error("Element `props` must be an object but is {0}")]
	InvalidProps(&'static str),

	#[error("`style` must be an object but is {0}")]
	InvalidStyle(&'static str),

	#[error("Style property {name:?} must be a string or number but is {found}")]
	InvalidStyleValue { name: String, found: &'static str },

	#[error("Prop {name:?} must be a string, number or boolean but is {found}")]
	UnsupportedPropValue { name: String, found: &'static str },

	#[error("A sequence can't be a child of another sequence")]
	NestedSequence,
}

fn kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}

/// The text form of a scalar, or [`None`] for `null`, arrays and objects.
fn scalar_text(value: &Value) -> Option<String> {
	match value {
		Value::String(string) => Some(string.clone()),
		Value::Number(number) => Some(match (number.as_i64(), number.as_u64(), number.as_f64()) {
			(Some(integer), _, _) => integer.to_string(),
			(None, Some(integer), _) => integer.to_string(),
			(None, None, Some(float)) => number_text(float),
			(None, None, None) => number.to_string(),
		}),
		Value::Bool(boolean) => Some(boolean.to_string()),
		Value::Null | Value::Array(_) | Value::Object(_) => None,
	}
}

impl Element {
	/// Loads an element from a JSON object.
	///
	/// A missing `type` yields an element without type, which the optimized renderer rejects with an
	/// [`InvalidElementError`](`crate::InvalidElementError`).
	/// A missing `props` is the same as an empty one. `null` props and `null` children are skipped.
	///
	/// # Errors
	///
	/// Iff `value` doesn't have the shape of element data. See [`JsonError`].
	pub fn from_json(value: &Value) -> Result<Self, JsonError> {
		let object = value.as_object().ok_or_else(|| JsonError::NotAnElement(kind(value)))?;

		let r#type = match object.get("type") {
			None | Some(Value::Null) => None,
			Some(Value::String(name)) => Some(ElementType::parse(name)),
			Some(other) => return Err(JsonError::InvalidType(kind(other))),
		};

		let props = match object.get("props") {
			None | Some(Value::Null) => Props::default(),
			Some(Value::Object(props)) => props_from_json(props)?,
			Some(other) => return Err(JsonError::InvalidProps(kind(other))),
		};

		Ok(Self { r#type, props })
	}
}

impl Child {
	/// Loads a child from JSON: objects are elements, scalars are text and `null` is [`None`].
	///
	/// # Errors
	///
	/// For arrays, which can't be children, and for malformed elements.
	pub fn from_json(value: &Value) -> Result<Option<Self>, JsonError> {
		match value {
			Value::Null => Ok(None),
			Value::Object(_) => Element::from_json(value).map(|element| Some(Self::Element(element))),
			Value::Array(_) => Err(JsonError::NestedSequence),
			Value::Bool(_) | Value::Number(_) | Value::String(_) => Ok(scalar_text(value).map(Self::Text)),
		}
	}
}

impl Children {
	/// Loads the `children` prop: an array is a sequence, anything else a single child.
	///
	/// # Errors
	///
	/// For nested arrays and malformed elements.
	pub fn from_json(value: &Value) -> Result<Self, JsonError> {
		Ok(match value {
			Value::Array(children) => Self::Many(children.iter().filter_map(|child| Child::from_json(child).transpose()).collect::<Result<_, _>>()?),
			single => match Child::from_json(single)? {
				Some(child) => Self::Single(Box::new(child)),
				None => Self::None,
			},
		})
	}
}

fn props_from_json(props: &Map<String, Value>) -> Result<Props, JsonError> {
	let mut entries = Vec::with_capacity(props.len());
	for (name, value) in props {
		let value = match (name.as_str(), value) {
			(_, Value::Null) => continue,
			("children", children) => PropValue::Children(Children::from_json(children)?),
			("style", Value::Object(style)) => PropValue::Style(style_from_json(style)?),
			("style", other @ Value::Array(_)) => return Err(JsonError::InvalidStyle(kind(other))),
			(_, scalar) => PropValue::Scalar(scalar_text(scalar).ok_or_else(|| JsonError::UnsupportedPropValue {
				name: name.clone(),
				found: kind(scalar),
			})?),
		};
		entries.push((name.as_str(), value));
	}
	Ok(Props::from_entries(entries))
}

fn style_from_json(style: &Map<String, Value>) -> Result<Vec<(String, String)>, JsonError> {
	style
		.iter()
		.filter(|(_, value)| !value.is_null())
		.map(|(name, value)| match value {
			Value::String(_) | Value::Number(_) => Ok((name.clone(), scalar_text(value).unwrap_or_default())),
			other => Err(JsonError::InvalidStyleValue {
				name: name.clone(),
				found: kind(other),
			}),
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn nested_element() {
		let element = Element::from_json(&json!({
			"type": "div",
			"props": {
				"className": "c",
				"style": { "color": "red", "textAlign": "center", "zIndex": 2, "margin": null },
				"children": [{ "type": "h1", "props": { "children": "Hi" } }, null, 3, true],
			},
		}))
		.unwrap();

		assert_eq!(
			element,
			Element::new("div")
				.class_name("c")
				.style("color", "red")
				.style("textAlign", "center")
				.style("zIndex", "2")
				.child(Element::new("h1").single_child("Hi"))
				.child(3)
				.child("true")
		);
	}

	#[test]
	fn missing_type_and_props() {
		assert_eq!(Element::from_json(&json!({ "props": { "children": "x" } })).unwrap(), Element::untyped(Props { children: Children::single("x"), ..Props::default() }));
		assert_eq!(Element::from_json(&json!({ "type": "br" })).unwrap(), Element::new("br"));
	}

	#[test]
	fn text_sentinel() {
		let element = Element::from_json(&json!({ "type": "TEXT_ELEMENT", "props": { "nodeValue": "plain" } })).unwrap();
		assert_eq!(element, Element::text("plain"));
	}

	#[test]
	fn float_numbers_drop_trailing_zeroes() {
		assert_eq!(Child::from_json(&json!(3.0)).unwrap(), Some(Child::from("3")));
		assert_eq!(Child::from_json(&json!(0.5)).unwrap(), Some(Child::from("0.5")));
	}

	#[test]
	fn attributes_are_stringified() {
		let element = Element::from_json(&json!({ "type": "input", "props": { "disabled": true, "maxLength": 8, "onclick": "go()" } })).unwrap();
		assert_eq!(
			element.props.attributes,
			vec![
				("disabled".to_owned(), "true".to_owned()),
				("maxLength".to_owned(), "8".to_owned()),
				("onclick".to_owned(), "go()".to_owned()),
			]
		);
		assert!(element.props.event_handlers.is_empty());
	}

	#[test]
	fn malformed_data() {
		assert_eq!(Element::from_json(&json!("div")), Err(JsonError::NotAnElement("a string")));
		assert_eq!(Element::from_json(&json!({ "type": 1 })), Err(JsonError::InvalidType("a number")));
		assert_eq!(Element::from_json(&json!({ "type": "p", "props": [] })), Err(JsonError::InvalidProps("an array")));
		assert_eq!(Element::from_json(&json!({ "type": "p", "props": { "style": [] } })), Err(JsonError::InvalidStyle("an array")));
		assert_eq!(
			Element::from_json(&json!({ "type": "p", "props": { "style": { "color": {} } } })),
			Err(JsonError::InvalidStyleValue {
				name: "color".to_owned(),
				found: "an object",
			})
		);
		assert_eq!(
			Element::from_json(&json!({ "type": "p", "props": { "data": {} } })),
			Err(JsonError::UnsupportedPropValue {
				name: "data".to_owned(),
				found: "an object",
			})
		);
		assert_eq!(Element::from_json(&json!({ "type": "p", "props": { "children": [["a"]] } })), Err(JsonError::NestedSequence));
	}
}
