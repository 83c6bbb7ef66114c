use serde::{Deserialize, Serialize};

use crate::core::{LeafId, PackLayout, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::RenderFrame;

use super::BubbleChart;

pub const LAYOUT_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Geometry of one rendered leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafSnapshot {
    pub id: LeafId,
    pub label: String,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

/// Deterministic layout dump used for golden-output comparisons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub viewport: Viewport,
    pub leaves: Vec<LeafSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: LayoutSnapshot,
}

impl From<&RenderFrame> for LayoutSnapshot {
    fn from(frame: &RenderFrame) -> Self {
        Self {
            viewport: frame.viewport,
            leaves: frame
                .bubbles
                .iter()
                .map(|bubble| LeafSnapshot {
                    id: bubble.id.clone(),
                    label: bubble.label.clone(),
                    value: bubble.value,
                    x: bubble.x,
                    y: bubble.y,
                    r: bubble.r,
                })
                .collect(),
        }
    }
}

impl LayoutSnapshot {
    #[must_use]
    pub fn leaf(&self, id: &LeafId) -> Option<&LeafSnapshot> {
        self.leaves.iter().find(|leaf| &leaf.id == id)
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = LayoutSnapshotJsonContractV1 {
            schema_version: LAYOUT_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize layout snapshot: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<LayoutSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: LayoutSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse layout snapshot json: {e}"))
        })?;
        if payload.schema_version != LAYOUT_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported layout snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl<L: PackLayout> BubbleChart<L> {
    /// Snapshot of the layout the current state would render.
    pub fn layout_snapshot(&self) -> ChartResult<LayoutSnapshot> {
        Ok(LayoutSnapshot::from(&self.frame()?))
    }

    pub fn layout_snapshot_json_contract_v1_pretty(&self) -> ChartResult<String> {
        self.layout_snapshot()?.to_json_contract_v1_pretty()
    }
}
