//! bubble-chart-rs: circle-packing bubble chart engine.
//!
//! Flat or nested records are turned into a weighted hierarchy, packed into
//! non-overlapping circles and drawn into a headless SVG document that the
//! chart reconciles by leaf id on every update. Pointer input on circles is
//! surfaced as `nodeclick` / `nodemouseover` / `nodemouseout` events.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{BubbleChart, ChartConfig, ChartData};
pub use error::{ChartError, ChartResult};
