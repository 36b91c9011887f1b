//! Reads live nodes back into [`Element`]s, the inverse of rendering.

use crate::{
	dom::{Inspect, LiveNode},
	element::{Child, Children, Element, ElementType, Props},
	style,
};
use tracing::warn;

/// Loads the children of `node`. Node kinds other than elements and text are skipped.
pub fn load_child_nodes<D: Inspect>(dom: &D, node: &D::Node) -> Children {
	let children: Vec<Child> = dom
		.child_nodes(node)
		.iter()
		.filter_map(|child| match dom.node_kind(child) {
			LiveNode::Element { tag, attributes } => Some(Child::Element(load_element_parts(dom, child, tag, attributes))),
			LiveNode::Text(text) => Some(Child::Text(text)),
			LiveNode::Other => {
				warn!("Skipping unrecognised child node: {:?}", child);
				None
			}
		})
		.collect();

	if children.is_empty() {
		Children::None
	} else {
		Children::Many(children)
	}
}

/// Loads `node` and its subtree, or returns [`None`] if it isn't an element.
pub fn load_element<D: Inspect>(dom: &D, node: &D::Node) -> Option<Element> {
	match dom.node_kind(node) {
		LiveNode::Element { tag, attributes } => Some(load_element_parts(dom, node, tag, attributes)),
		LiveNode::Text(_) | LiveNode::Other => None,
	}
}

fn load_element_parts<D: Inspect>(dom: &D, node: &D::Node, tag: String, attributes: Vec<(String, String)>) -> Element {
	Element {
		r#type: Some(ElementType::Tag(tag)),
		props: Props {
			children: load_child_nodes(dom, node),
			..load_attributes(attributes)
		},
	}
}

/// Sorts live attributes back into props: `class` becomes `class_name`
/// and `style` is split into camelCase declarations.
#[must_use]
pub fn load_attributes(attributes: Vec<(String, String)>) -> Props {
	let mut props = Props::default();
	for (name, value) in attributes {
		match name.as_str() {
			"class" => props.class_name = Some(value),
			"style" => {
				props.style = style::parse_declarations(&value)
					.into_iter()
					.map(|(name, value)| (style::to_camel_case(&name).into_owned(), value))
					.collect()
			}
			_ => props.attributes.push((name, value)),
		}
	}
	props
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn attributes_are_sorted_into_props() {
		let props = load_attributes(vec![
			("href".to_owned(), "https://x.test".to_owned()),
			("class".to_owned(), "link".to_owned()),
			("style".to_owned(), "color: purple; text-align: center;".to_owned()),
		]);
		assert_eq!(props.class_name.as_deref(), Some("link"));
		assert_eq!(props.style, vec![("color".to_owned(), "purple".to_owned()), ("textAlign".to_owned(), "center".to_owned())]);
		assert_eq!(props.attributes, vec![("href".to_owned(), "https://x.test".to_owned())]);
		assert_eq!(props.children, Children::None);
	}
}
