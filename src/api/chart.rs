use crate::core::{LeafId, PackLayout, SiblingPackLayout, Viewport};
use crate::render::{ElementId, StyleOverrides};

use super::{ChartConfig, ChartData, ChartState};

/// Circle-packing chart controller consumed by host applications.
///
/// `BubbleChart` owns the chart state, rebuilds hierarchy and layout on every
/// render/update, reconciles the host document and turns pointer input on
/// circles into `nodeclick` / `nodemouseover` / `nodemouseout` events.
#[derive(Debug)]
pub struct BubbleChart<L: PackLayout = SiblingPackLayout> {
    pub(super) config: ChartConfig,
    pub(super) layout: L,
    pub(super) state: ChartState,
}

impl<L: PackLayout> BubbleChart<L> {
    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn layout(&self) -> &L {
        &self.layout
    }

    #[must_use]
    pub fn state(&self) -> &ChartState {
        &self.state
    }

    #[must_use]
    pub fn data(&self) -> &ChartData {
        &self.state.data_source
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.state.viewport.width
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.state.viewport.height
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.state.viewport
    }

    #[must_use]
    pub fn style_overrides(&self) -> &StyleOverrides {
        &self.state.style_overrides
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.state.attachment.is_some()
    }

    #[must_use]
    pub fn artboard(&self) -> Option<ElementId> {
        self.state.attachment.map(|attachment| attachment.artboard)
    }

    #[must_use]
    pub fn leaf_group(&self, id: &LeafId) -> Option<ElementId> {
        self.state
            .rendered
            .iter()
            .find(|bubble| &bubble.id == id)
            .map(|bubble| bubble.group)
    }

    #[must_use]
    pub fn leaf_circle(&self, id: &LeafId) -> Option<ElementId> {
        self.state
            .rendered
            .iter()
            .find(|bubble| &bubble.id == id)
            .map(|bubble| bubble.circle)
    }

    #[must_use]
    pub fn leaf_label(&self, id: &LeafId) -> Option<ElementId> {
        self.state
            .rendered
            .iter()
            .find(|bubble| &bubble.id == id)
            .map(|bubble| bubble.label)
    }

    #[must_use]
    pub fn rendered_leaf_count(&self) -> usize {
        self.state.rendered.len()
    }
}
