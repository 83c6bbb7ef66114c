use serde::{Deserialize, Serialize};

use crate::core::{
    HierarchyDatum, HierarchyNode, LeafRecord, Viewport, build_hierarchy, build_nested_hierarchy,
};
use crate::error::ChartResult;
use crate::render::{BubblePrimitive, ElementId, RenderedBubble, StyleOverrides};

/// Source data fed to the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartData {
    Flat(Vec<LeafRecord>),
    Nested(Vec<HierarchyDatum>),
}

impl Default for ChartData {
    fn default() -> Self {
        Self::Flat(Vec::new())
    }
}

impl From<Vec<LeafRecord>> for ChartData {
    fn from(records: Vec<LeafRecord>) -> Self {
        Self::Flat(records)
    }
}

impl From<Vec<HierarchyDatum>> for ChartData {
    fn from(data: Vec<HierarchyDatum>) -> Self {
        Self::Nested(data)
    }
}

impl ChartData {
    pub fn build_hierarchy(&self) -> ChartResult<HierarchyNode> {
        match self {
            Self::Flat(records) => build_hierarchy(records),
            Self::Nested(data) => build_nested_hierarchy(data),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Flat(records) => records.is_empty(),
            Self::Nested(data) => data.is_empty(),
        }
    }
}

/// Where the chart is mounted in the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attachment {
    pub host: ElementId,
    pub artboard: ElementId,
}

/// Mutable chart state; the controller is its only writer.
#[derive(Debug, Clone)]
pub struct ChartState {
    pub(crate) data_source: ChartData,
    pub(crate) viewport: Viewport,
    pub(crate) style_overrides: StyleOverrides,
    pub(crate) attachment: Option<Attachment>,
    /// Element handles from the latest pass, in data order.
    pub(crate) rendered: Vec<RenderedBubble>,
    /// Geometry and payload of the latest pass, aligned with `rendered`.
    pub(crate) bubbles: Vec<BubblePrimitive>,
}

impl ChartState {
    pub(crate) fn new(data_source: ChartData, viewport: Viewport) -> Self {
        Self {
            data_source,
            viewport,
            style_overrides: StyleOverrides::new(),
            attachment: None,
            rendered: Vec::new(),
            bubbles: Vec::new(),
        }
    }

    #[must_use]
    pub fn data_source(&self) -> &ChartData {
        &self.data_source
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn style_overrides(&self) -> &StyleOverrides {
        &self.style_overrides
    }

    #[must_use]
    pub fn attachment(&self) -> Option<Attachment> {
        self.attachment
    }

    #[must_use]
    pub fn rendered(&self) -> &[RenderedBubble] {
        &self.rendered
    }

    #[must_use]
    pub fn bubbles(&self) -> &[BubblePrimitive] {
        &self.bubbles
    }
}
