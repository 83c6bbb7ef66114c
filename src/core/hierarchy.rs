use std::cmp::Reverse;
use std::collections::HashSet;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::record::{LeafId, LeafRecord};
use crate::error::{ChartError, ChartResult};

/// Nested input accepted by [`build_nested_hierarchy`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HierarchyDatum {
    Group {
        id: LeafId,
        label: String,
        children: Vec<HierarchyDatum>,
    },
    Leaf(LeafRecord),
}

impl HierarchyDatum {
    fn id(&self) -> &LeafId {
        match self {
            Self::Group { id, .. } => id,
            Self::Leaf(record) => &record.id,
        }
    }
}

impl From<LeafRecord> for HierarchyDatum {
    fn from(record: LeafRecord) -> Self {
        Self::Leaf(record)
    }
}

/// Payload carried by one hierarchy node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeData {
    Root,
    Group { id: LeafId, label: String },
    Leaf(LeafRecord),
}

impl NodeData {
    #[must_use]
    pub fn leaf(&self) -> Option<&LeafRecord> {
        match self {
            Self::Leaf(record) => Some(record),
            Self::Root | Self::Group { .. } => None,
        }
    }
}

/// Sibling ordering applied while building the tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HierarchySort {
    /// Keep source order.
    #[default]
    Input,
    /// Larger aggregate values first; ties keep source order.
    ValueDescending,
}

/// Weighted tree node. Internal node values are the sum of their children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyNode {
    pub data: NodeData,
    pub value: f64,
    pub depth: usize,
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Leaf records in pre-order.
    #[must_use]
    pub fn leaves(&self) -> Vec<&LeafRecord> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a LeafRecord>) {
        if let Some(record) = self.data.leaf() {
            out.push(record);
        }
        for child in &self.children {
            child.collect_leaves(out);
        }
    }

    #[must_use]
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }

    /// Re-orders siblings at every level.
    pub fn sort(&mut self, sort: HierarchySort) {
        if sort == HierarchySort::ValueDescending {
            self.children
                .sort_by_key(|child| Reverse(OrderedFloat(child.value)));
        }
        for child in &mut self.children {
            child.sort(sort);
        }
    }
}

/// Wraps a flat record list under a synthetic root.
pub fn build_hierarchy(records: &[LeafRecord]) -> ChartResult<HierarchyNode> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut children = Vec::with_capacity(records.len());
    for record in records {
        record.validate()?;
        if !seen.insert(&record.id) {
            return Err(duplicate_id(&record.id));
        }
        children.push(HierarchyNode {
            data: NodeData::Leaf(record.clone()),
            value: record.value,
            depth: 1,
            children: Vec::new(),
        });
    }
    let value = children.iter().map(|child| child.value).sum();
    Ok(HierarchyNode {
        data: NodeData::Root,
        value,
        depth: 0,
        children,
    })
}

/// Builds a tree of arbitrary depth; groups aggregate their descendants.
pub fn build_nested_hierarchy(data: &[HierarchyDatum]) -> ChartResult<HierarchyNode> {
    let children = build_level(data, 1)?;
    let value = children.iter().map(|child| child.value).sum();
    Ok(HierarchyNode {
        data: NodeData::Root,
        value,
        depth: 0,
        children,
    })
}

fn build_level(data: &[HierarchyDatum], depth: usize) -> ChartResult<Vec<HierarchyNode>> {
    let mut seen = HashSet::with_capacity(data.len());
    let mut nodes = Vec::with_capacity(data.len());
    for datum in data {
        if !seen.insert(datum.id()) {
            return Err(duplicate_id(datum.id()));
        }
        let node = match datum {
            HierarchyDatum::Leaf(record) => {
                record.validate()?;
                HierarchyNode {
                    data: NodeData::Leaf(record.clone()),
                    value: record.value,
                    depth,
                    children: Vec::new(),
                }
            }
            HierarchyDatum::Group {
                id,
                label,
                children,
            } => {
                let children = build_level(children, depth + 1)?;
                HierarchyNode {
                    data: NodeData::Group {
                        id: id.clone(),
                        label: label.clone(),
                    },
                    value: children.iter().map(|child| child.value).sum(),
                    depth,
                    children,
                }
            }
        };
        nodes.push(node);
    }
    Ok(nodes)
}

fn duplicate_id(id: &LeafId) -> ChartError {
    ChartError::InvalidRecord(format!("duplicate sibling id `{id}`"))
}
