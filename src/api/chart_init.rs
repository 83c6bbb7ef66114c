use tracing::debug;

use crate::core::{PackLayout, SiblingPackLayout};
use crate::error::ChartResult;

use super::validation::validate_chart_data;
use super::{BubbleChart, ChartConfig, ChartData, ChartState};

impl BubbleChart {
    /// Creates an unattached chart with default dimensions.
    pub fn new(data: impl Into<ChartData>) -> ChartResult<Self> {
        Self::from_config(ChartConfig::default(), data)
    }

    /// Creates an unattached chart with explicit dimensions.
    ///
    /// Dimensions are checked when the chart is rendered.
    pub fn with_dimensions(
        data: impl Into<ChartData>,
        width: f64,
        height: f64,
    ) -> ChartResult<Self> {
        Self::from_config(ChartConfig::default().with_dimensions(width, height), data)
    }

    pub fn from_config(config: ChartConfig, data: impl Into<ChartData>) -> ChartResult<Self> {
        Self::with_layout(SiblingPackLayout::default(), config, data)
    }
}

impl Default for BubbleChart {
    fn default() -> Self {
        let config = ChartConfig::default();
        let state = ChartState::new(ChartData::default(), config.viewport);
        Self {
            config,
            layout: SiblingPackLayout::default(),
            state,
        }
    }
}

impl<L: PackLayout> BubbleChart<L> {
    /// Creates an unattached chart backed by a custom packing layout.
    ///
    /// Performs no document work; records and configuration are validated.
    pub fn with_layout(
        layout: L,
        config: ChartConfig,
        data: impl Into<ChartData>,
    ) -> ChartResult<Self> {
        config.validate()?;
        let data = data.into();
        validate_chart_data(&data)?;

        let viewport = config.viewport;
        debug!(
            width = viewport.width,
            height = viewport.height,
            empty = data.is_empty(),
            "bubble chart constructed"
        );
        Ok(Self {
            config,
            layout,
            state: ChartState::new(data, viewport),
        })
    }
}
