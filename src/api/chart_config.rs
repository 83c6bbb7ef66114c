use serde::{Deserialize, Serialize};

use crate::core::{HierarchySort, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::ClassNames;

pub const DEFAULT_WIDTH: f64 = 600.0;
pub const DEFAULT_HEIGHT: f64 = 600.0;
/// Gap between sibling circles, in artboard units.
pub const DEFAULT_PADDING: f64 = 3.0;
/// Total shrink applied to the packing box, leaving room for circle strokes.
pub const DEFAULT_INSET: f64 = 2.0;
/// Base unit used when no host font size is available.
pub const DEFAULT_ARTBOARD_UNIT: f64 = 16.0;

/// Public chart bootstrap configuration.
///
/// Serializable so hosts can persist and load chart setup without an ad-hoc
/// format. Dimensions are only checked at render/update time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_viewport")]
    pub viewport: Viewport,
    #[serde(default)]
    pub classes: ClassNames,
    #[serde(default = "default_padding")]
    pub padding: f64,
    #[serde(default = "default_inset")]
    pub inset: f64,
    #[serde(default = "default_artboard_unit")]
    pub artboard_unit: f64,
    #[serde(default)]
    pub sort: HierarchySort,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            viewport: default_viewport(),
            classes: ClassNames::default(),
            padding: default_padding(),
            inset: default_inset(),
            artboard_unit: default_artboard_unit(),
            sort: HierarchySort::default(),
        }
    }
}

impl ChartConfig {
    #[must_use]
    pub fn with_dimensions(mut self, width: f64, height: f64) -> Self {
        self.viewport = Viewport::new(width, height);
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_inset(mut self, inset: f64) -> Self {
        self.inset = inset;
        self
    }

    /// Injects the base unit of measure (a host's root font size, for instance).
    #[must_use]
    pub fn with_artboard_unit(mut self, unit: f64) -> Self {
        self.artboard_unit = unit;
        self
    }

    #[must_use]
    pub fn with_classes(mut self, classes: ClassNames) -> Self {
        self.classes = classes;
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: HierarchySort) -> Self {
        self.sort = sort;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (name, value) in [("padding", self.padding), ("inset", self.inset)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "chart {name} must be finite and >= 0"
                )));
            }
        }
        if !self.artboard_unit.is_finite() || self.artboard_unit <= 0.0 {
            return Err(ChartError::InvalidData(
                "artboard unit must be finite and > 0".to_owned(),
            ));
        }
        self.classes.validate()
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_viewport() -> Viewport {
    Viewport::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
}

fn default_padding() -> f64 {
    DEFAULT_PADDING
}

fn default_inset() -> f64 {
    DEFAULT_INSET
}

fn default_artboard_unit() -> f64 {
    DEFAULT_ARTBOARD_UNIT
}
