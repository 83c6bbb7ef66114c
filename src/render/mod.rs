mod document;
mod dom_renderer;
mod frame;
mod join;
mod null_renderer;
mod primitives;

pub use document::{DomEvent, Document, Element, ElementId, ListenerId};
pub use dom_renderer::{DomRenderer, RenderedBubble};
pub use frame::RenderFrame;
pub use join::{JoinOutcome, join_indexed, join_keyed};
pub use null_renderer::NullRenderer;
pub use primitives::{
    BubblePrimitive, ClassNames, DEFAULT_ACTIVE_CLASS, DEFAULT_ARTBOARD_CLASS,
    DEFAULT_LABEL_CLASS, DEFAULT_NODE_CLASS, LabelLine, StyleOverrides, style_overrides,
};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code stays isolated from hierarchy building, packing and
/// interaction handling.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
