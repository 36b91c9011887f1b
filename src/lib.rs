//! A one-shot element tree renderer.
//!
//! [`Element`]s describe UI nodes declaratively.
//! [`render`] materializes such a tree depth-first into live nodes of a UI runtime ([`Dom`])
//! and appends the result to an existing container. There is no diffing: every call is a fresh, total mount.
//!
//! Two UI runtimes are included: [`memory::MemoryDom`] keeps nodes in memory,
//! [`web::WebDom`] creates them in a browser document.

#![doc(html_root_url = "https://docs.rs/sapling-dom/0.1.0")]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

mod closure_map;
pub mod dom;
pub mod element;
mod error;
pub mod event;
pub mod json;
pub mod load;
pub mod memory;
mod render;
pub mod style;
pub mod web;

pub use crate::{
	dom::{Dom, Inspect, LiveNode},
	element::{Child, Children, Element, ElementType, PropValue, Props},
	error::{InvalidElementError, RenderError},
	event::{Event, EventHandler},
	json::JsonError,
	render::{render, render_naive, ListenerTarget, Renderer},
};
