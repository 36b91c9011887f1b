use thiserror::Error;

/// An element without usable `type` was passed to the optimized renderer.
///
/// `path` holds the child indices from the render root down to the offending element.
/// It is empty if the root itself is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid Element type at child path {path:?}")]
pub struct InvalidElementError {
	pub path: Vec<usize>,
}

/// Everything that can abort a render.
///
/// Errors of the UI runtime are passed through as [`RenderError::Host`], untouched.
#[derive(Debug, Error)]
pub enum RenderError<E> {
	#[error(transparent)]
	InvalidElement(#[from] InvalidElementError),

	#[error("Depth limit reached at child path {path:?}")]
	DepthLimitReached { path: Vec<usize> },

	#[error(transparent)]
	Host(E),
}

impl<E> RenderError<E> {
	/// The runtime error, if this is one.
	pub fn host(&self) -> Option<&E> {
		match self {
			Self::Host(error) => Some(error),
			Self::InvalidElement(_) | Self::DepthLimitReached { .. } => None,
		}
	}
}
