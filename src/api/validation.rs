use std::collections::HashSet;

use crate::core::{HierarchyNode, Viewport};
use crate::error::{ChartError, ChartResult};

use super::ChartData;

/// Builds the hierarchy for `data`, rejecting leaf ids that would collide as
/// reconciliation keys anywhere in the tree.
pub(super) fn validate_chart_data(data: &ChartData) -> ChartResult<HierarchyNode> {
    let root = data.build_hierarchy()?;
    let mut seen = HashSet::new();
    for record in root.leaves() {
        if !seen.insert(&record.id) {
            return Err(ChartError::InvalidRecord(format!(
                "leaf id `{}` is used by more than one leaf",
                record.id
            )));
        }
    }
    Ok(root)
}

/// Checks artboard dimensions and the packing box left after the inset.
pub(super) fn validate_dimensions(width: f64, height: f64, inset: f64) -> ChartResult<Viewport> {
    let viewport = Viewport::new(width, height).validate()?;
    viewport
        .inset(inset)
        .map_err(|_| ChartError::InvalidDimension { width, height })?;
    Ok(viewport)
}
