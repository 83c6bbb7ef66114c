mod chart;
mod chart_config;
mod chart_init;
mod chart_state;
mod interaction_controller;
mod render_coordinator;
mod snapshot;
mod validation;

pub use chart::BubbleChart;
pub use chart_config::{
    ChartConfig, DEFAULT_ARTBOARD_UNIT, DEFAULT_HEIGHT, DEFAULT_INSET, DEFAULT_PADDING,
    DEFAULT_WIDTH,
};
pub use chart_state::{Attachment, ChartData, ChartState};
pub use snapshot::{
    LAYOUT_SNAPSHOT_JSON_SCHEMA_V1, LayoutSnapshot, LayoutSnapshotJsonContractV1, LeafSnapshot,
};
