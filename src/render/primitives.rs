use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::core::{LeafId, LeafRecord};
use crate::error::{ChartError, ChartResult};

pub const DEFAULT_ARTBOARD_CLASS: &str = "lgv-bubble-chart";
pub const DEFAULT_NODE_CLASS: &str = "lgv-node";
pub const DEFAULT_LABEL_CLASS: &str = "lgv-label";
pub const DEFAULT_ACTIVE_CLASS: &str = "active";

/// Presentation attribute name → value, applied verbatim to every circle.
pub type StyleOverrides = IndexMap<String, String>;

/// Builds [`StyleOverrides`] from string pairs.
#[must_use]
pub fn style_overrides<I, K, V>(pairs: I) -> StyleOverrides
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(name, value)| (name.into(), value.into()))
        .collect()
}

/// Class names stamped on rendered elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassNames {
    pub artboard: String,
    pub node: String,
    pub label: String,
    pub active: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            artboard: DEFAULT_ARTBOARD_CLASS.to_owned(),
            node: DEFAULT_NODE_CLASS.to_owned(),
            label: DEFAULT_LABEL_CLASS.to_owned(),
            active: DEFAULT_ACTIVE_CLASS.to_owned(),
        }
    }
}

impl ClassNames {
    pub fn validate(&self) -> ChartResult<()> {
        for (field, value) in [
            ("artboard", &self.artboard),
            ("node", &self.node),
            ("label", &self.label),
            ("active", &self.active),
        ] {
            if value.is_empty() || value.chars().any(char::is_whitespace) {
                return Err(ChartError::InvalidData(format!(
                    "class name `{field}` must be a single non-empty token"
                )));
            }
        }
        Ok(())
    }
}

/// One stacked line of a bubble label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelLine {
    pub text: String,
    /// Vertical offset relative to the previous line (`dy` attribute).
    pub dy: String,
}

/// Draw command for one leaf bubble: a circle plus its stacked label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BubblePrimitive {
    pub id: LeafId,
    pub label: String,
    pub value: f64,
    /// Center in artboard coordinates.
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub lines: SmallVec<[LabelLine; 2]>,
}

impl BubblePrimitive {
    /// Label first, value underneath.
    #[must_use]
    pub fn new(record: &LeafRecord, x: f64, y: f64, r: f64) -> Self {
        Self {
            id: record.id.clone(),
            label: record.label.clone(),
            value: record.value,
            x,
            y,
            r,
            lines: smallvec![
                LabelLine {
                    text: record.label.clone(),
                    dy: "-0.1em".to_owned(),
                },
                LabelLine {
                    text: record.value.to_string(),
                    dy: "1.2em".to_owned(),
                },
            ],
        }
    }

    #[must_use]
    pub fn transform(&self) -> String {
        format!("translate({},{})", self.x, self.y)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(format!(
                "bubble `{}` center must be finite",
                self.id
            )));
        }
        if !self.r.is_finite() || self.r < 0.0 {
            return Err(ChartError::InvalidData(format!(
                "bubble `{}` radius must be finite and >= 0",
                self.id
            )));
        }
        Ok(())
    }
}

pub(crate) fn validate_style_overrides(styles: &StyleOverrides) -> ChartResult<()> {
    for name in styles.keys() {
        if name.is_empty()
            || name
                .chars()
                .any(|c| c.is_whitespace() || matches!(c, '"' | '<' | '>' | '=' | '/'))
        {
            return Err(ChartError::InvalidData(format!(
                "style override `{name}` is not a valid attribute name"
            )));
        }
    }
    Ok(())
}
