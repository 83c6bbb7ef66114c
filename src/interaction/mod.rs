mod events;

use serde::{Deserialize, Serialize};

pub use events::{
    ChartEvent, ChartEventKind, NODE_CLICK_EVENT, NODE_MOUSE_OUT_EVENT, NODE_MOUSE_OVER_EVENT,
    NodeEventDetail,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerKind {
    Click,
    Enter,
    Leave,
}

/// Raw pointer input targeted at one rendered element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerInput {
    pub kind: PointerKind,
    /// Viewport coordinates of the pointer.
    pub client_x: f64,
    pub client_y: f64,
}

impl PointerInput {
    #[must_use]
    pub fn new(kind: PointerKind, client_x: f64, client_y: f64) -> Self {
        Self {
            kind,
            client_x,
            client_y,
        }
    }

    #[must_use]
    pub fn click(client_x: f64, client_y: f64) -> Self {
        Self::new(PointerKind::Click, client_x, client_y)
    }

    #[must_use]
    pub fn enter(client_x: f64, client_y: f64) -> Self {
        Self::new(PointerKind::Enter, client_x, client_y)
    }

    #[must_use]
    pub fn leave(client_x: f64, client_y: f64) -> Self {
        Self::new(PointerKind::Leave, client_x, client_y)
    }

    /// Cursor position reported to hosts, offset by half the artboard unit.
    #[must_use]
    pub fn cursor_position(self, artboard_unit: f64) -> [f64; 2] {
        let half = artboard_unit / 2.0;
        [self.client_x + half, self.client_y + half]
    }
}

/// Hover presentation of one bubble.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodePresentation {
    #[default]
    Idle,
    Active,
}

impl NodePresentation {
    /// Reads the presentation back from a circle's `class` attribute.
    #[must_use]
    pub fn from_class_attr(class_attr: Option<&str>, active_class: &str) -> Self {
        match class_attr {
            Some(classes) if classes.split_whitespace().any(|c| c == active_class) => {
                Self::Active
            }
            _ => Self::Idle,
        }
    }

    #[must_use]
    pub fn transition(self, kind: PointerKind) -> Self {
        match kind {
            PointerKind::Enter => Self::Active,
            PointerKind::Leave => Self::Idle,
            PointerKind::Click => self,
        }
    }

    #[must_use]
    pub fn class_attr(self, node_class: &str, active_class: &str) -> String {
        match self {
            Self::Idle => node_class.to_owned(),
            Self::Active => format!("{node_class} {active_class}"),
        }
    }
}
