use crate::event::{Event, EventHandler};
use hashbrown::{hash_map::Entry, HashMap};
use js_sys::Function;
use tracing::trace;
use wasm_bindgen::{closure::Closure, JsCast};

/// Keeps the JavaScript closures of published [`EventHandler`]s alive.
///
/// Each handler is wrapped only once, no matter how many listeners use it.
/// The closures are freed when the map is dropped, after which the listeners throw into JavaScript when called.
#[derive(Default)]
pub(crate) struct ClosureMap(HashMap<*const (), Closure<dyn Fn(web_sys::Event)>>);
impl ClosureMap {
	pub(crate) fn publish(&mut self, handler: &EventHandler) -> &Function {
		let js_closure: &Closure<dyn Fn(web_sys::Event)> = match self.0.entry(handler.addr()) {
			Entry::Occupied(occupied) => occupied.into_mut(),
			Entry::Vacant(vacant) => {
				// The closure owns a clone of the handler, so the key can't be reused while it's in the map.
				let handler = handler.clone();
				trace!("Created Closure.");
				vacant.insert(Closure::wrap(Box::new(move |event: web_sys::Event| handler.call(&Event::new(event.type_()))) as Box<dyn Fn(web_sys::Event)>))
			}
		};
		js_closure.as_ref().unchecked_ref::<Function>()
	}

	pub(crate) fn len(&self) -> usize {
		self.0.len()
	}
}
impl core::fmt::Debug for ClosureMap {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("ClosureMap").field("len", &self.0.len()).finish()
	}
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
	use super::*;
	use wasm_bindgen_test::wasm_bindgen_test;

	#[wasm_bindgen_test]
	fn handlers_are_published_once() {
		let mut map = ClosureMap::default();
		let handler = EventHandler::new(|_| ());
		let first = map.publish(&handler).clone();
		let second = map.publish(&handler.clone()).clone();
		let other = map.publish(&EventHandler::new(|_| ())).clone();

		assert_eq!(first, second);
		assert_ne!(first, other);
		assert_eq!(map.len(), 2);
	}
}
