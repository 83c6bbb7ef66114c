use std::collections::HashSet;

use crate::core::{LeafId, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::primitives::validate_style_overrides;
use crate::render::{BubblePrimitive, ClassNames, StyleOverrides};

/// Backend-agnostic scene for one chart generation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub classes: ClassNames,
    pub style_overrides: StyleOverrides,
    /// Attributes applied by an earlier pass that must be cleared from circles.
    pub retired_styles: Vec<String>,
    pub bubbles: Vec<BubblePrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport, classes: ClassNames) -> Self {
        Self {
            viewport,
            classes,
            style_overrides: StyleOverrides::new(),
            retired_styles: Vec::new(),
            bubbles: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_style_overrides(mut self, styles: StyleOverrides) -> Self {
        self.style_overrides = styles;
        self
    }

    #[must_use]
    pub fn with_retired_styles(mut self, retired: Vec<String>) -> Self {
        self.retired_styles = retired;
        self
    }

    #[must_use]
    pub fn with_bubble(mut self, bubble: BubblePrimitive) -> Self {
        self.bubbles.push(bubble);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.viewport.validate()?;
        self.classes.validate()?;
        validate_style_overrides(&self.style_overrides)?;

        let mut seen = HashSet::with_capacity(self.bubbles.len());
        for bubble in &self.bubbles {
            bubble.validate()?;
            if !seen.insert(&bubble.id) {
                return Err(ChartError::InvalidRecord(format!(
                    "leaf id `{}` appears more than once",
                    bubble.id
                )));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    #[must_use]
    pub fn bubble(&self, id: &LeafId) -> Option<&BubblePrimitive> {
        self.bubbles.iter().find(|bubble| &bubble.id == id)
    }
}
