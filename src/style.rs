//! Inline style property names and declaration lists.
//!
//! Element data names style properties in camelCase (`textAlign`), as script style objects do.
//! UI runtimes take the hyphenated CSS form (`text-align`).

use std::borrow::Cow;

/// Vendor prefixes that script style objects spell in lower case, like `msTransform` or `webkitTransform`.
const LOWER_CASE_VENDOR_PREFIXES: [&str; 4] = ["ms", "webkit", "moz", "o"];

/// `"textAlign"` → `"text-align"`, `"WebkitTransform"` and `"webkitTransform"` → `"-webkit-transform"`,
/// `"cssFloat"` → `"float"`.
///
/// Hyphenated names and custom properties (`--name`) are returned as-is.
#[must_use]
pub fn to_kebab_case(name: &str) -> Cow<'_, str> {
	if name == "cssFloat" {
		return Cow::Borrowed("float");
	}
	if name.starts_with("--") || !name.bytes().any(|b| b.is_ascii_uppercase()) {
		return Cow::Borrowed(name);
	}

	let mut kebab = String::with_capacity(name.len() + 4);
	if LOWER_CASE_VENDOR_PREFIXES
		.iter()
		.any(|prefix| name.strip_prefix(prefix).map_or(false, |rest| rest.starts_with(|c: char| c.is_ascii_uppercase())))
	{
		kebab.push('-');
	}
	for c in name.chars() {
		if c.is_ascii_uppercase() {
			kebab.push('-');
			kebab.push(c.to_ascii_lowercase());
		} else {
			kebab.push(c);
		}
	}
	Cow::Owned(kebab)
}

/// The inverse of [`to_kebab_case`]: `"text-align"` → `"textAlign"`.
#[must_use]
pub fn to_camel_case(name: &str) -> Cow<'_, str> {
	if name.starts_with("--") || !name.contains('-') {
		return Cow::Borrowed(name);
	}

	Cow::Owned(if let Some(rest) = name.strip_prefix("-ms-") {
		format!("ms{}", camelize(rest, true))
	} else if let Some(rest) = name.strip_prefix('-') {
		camelize(rest, true)
	} else {
		camelize(name, false)
	})
}

fn camelize(hyphenated: &str, mut capitalize: bool) -> String {
	let mut camel = String::with_capacity(hyphenated.len());
	for c in hyphenated.chars() {
		if c == '-' {
			capitalize = true;
		} else if capitalize {
			camel.push(c.to_ascii_uppercase());
			capitalize = false;
		} else {
			camel.push(c);
		}
	}
	camel
}

/// Whether a hyphenated property name is plausible enough to forward to a UI runtime.
#[must_use]
pub fn is_valid_property_name(name: &str) -> bool {
	match name.strip_prefix("--") {
		Some(custom) => !custom.is_empty() && !custom.contains(|c: char| c.is_whitespace() || c == ';' || c == ':'),
		None => name.bytes().any(|b| b.is_ascii_alphabetic()) && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-'),
	}
}

/// Parses a `style` attribute value into `(name, value)` declarations, in order.
#[must_use]
pub fn parse_declarations(css: &str) -> Vec<(String, String)> {
	css.split(';')
		.filter_map(|declaration| {
			let (name, value) = declaration.split_once(':')?;
			let name = name.trim();
			let value = value.trim();
			if name.is_empty() {
				None
			} else if name.starts_with("--") {
				Some((name.to_owned(), value.to_owned()))
			} else {
				Some((name.to_ascii_lowercase(), value.to_owned()))
			}
		})
		.collect()
}

/// Serializes declarations the way browsers write back the `style` attribute: `"color: red; text-align: center;"`.
#[must_use]
pub fn serialize_declarations(declarations: &[(String, String)]) -> String {
	declarations.iter().map(|(name, value)| format!("{}: {};", name, value)).collect::<Vec<_>>().join(" ")
}
