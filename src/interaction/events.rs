use serde::{Deserialize, Serialize};

use crate::core::LeafId;

pub const NODE_CLICK_EVENT: &str = "nodeclick";
pub const NODE_MOUSE_OVER_EVENT: &str = "nodemouseover";
pub const NODE_MOUSE_OUT_EVENT: &str = "nodemouseout";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartEventKind {
    NodeClick,
    NodeMouseOver,
    NodeMouseOut,
}

impl ChartEventKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::NodeClick => NODE_CLICK_EVENT,
            Self::NodeMouseOver => NODE_MOUSE_OVER_EVENT,
            Self::NodeMouseOut => NODE_MOUSE_OUT_EVENT,
        }
    }
}

/// Payload describing the bubble under the pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeEventDetail {
    pub id: LeafId,
    pub label: String,
    pub value: f64,
    /// Pointer viewport position shifted by half the artboard unit.
    pub xy: [f64; 2],
}

/// Custom event re-dispatched on the artboard for host consumption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEvent {
    pub kind: ChartEventKind,
    pub bubbles: bool,
    pub detail: Option<NodeEventDetail>,
}

impl ChartEvent {
    #[must_use]
    pub fn node_click(detail: NodeEventDetail) -> Self {
        Self {
            kind: ChartEventKind::NodeClick,
            bubbles: true,
            detail: Some(detail),
        }
    }

    #[must_use]
    pub fn node_mouse_over(detail: NodeEventDetail) -> Self {
        Self {
            kind: ChartEventKind::NodeMouseOver,
            bubbles: true,
            detail: Some(detail),
        }
    }

    #[must_use]
    pub fn node_mouse_out() -> Self {
        Self {
            kind: ChartEventKind::NodeMouseOut,
            bubbles: true,
            detail: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}
