use core::fmt::{self, Debug, Formatter};
use std::rc::Rc;

/// The event value passed to [`EventHandler`]s.
///
/// Only the event name is carried over from the UI runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
	name: String,
}
impl Event {
	#[must_use]
	pub fn new(name: impl Into<String>) -> Self {
		Self { name: name.into() }
	}

	/// The event's name, like `"click"`.
	#[must_use]
	pub fn name(&self) -> &str {
		&self.name
	}
}

/// A shared, thread-bound event handler.
///
/// Handlers compare by identity: two [`EventHandler`]s are equal iff they are clones of each other.
#[derive(Clone)]
pub struct EventHandler(Rc<dyn Fn(&Event)>);
impl EventHandler {
	pub fn new(handler: impl 'static + Fn(&Event)) -> Self {
		Self(Rc::new(handler))
	}

	pub fn call(&self, event: &Event) {
		(self.0)(event)
	}

	/// Identity of the shared closure, stable for as long as any clone is alive.
	pub(crate) fn addr(&self) -> *const () {
		Rc::as_ptr(&self.0).cast::<()>()
	}
}
impl<F: 'static + Fn(&Event)> From<F> for EventHandler {
	fn from(handler: F) -> Self {
		Self::new(handler)
	}
}
impl PartialEq for EventHandler {
	fn eq(&self, other: &Self) -> bool {
		self.addr() == other.addr()
	}
}
impl Eq for EventHandler {}
impl Debug for EventHandler {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_tuple("EventHandler").field(&self.addr()).finish()
	}
}
