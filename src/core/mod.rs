pub mod enclose;
pub mod hierarchy;
pub mod pack;
pub mod record;
pub mod types;

pub use enclose::{Lcg, enclose};
pub use hierarchy::{
    HierarchyDatum, HierarchyNode, HierarchySort, NodeData, build_hierarchy,
    build_nested_hierarchy,
};
pub use pack::{PackLayout, PackReport, PackedNode, SiblingPackLayout, pack_siblings};
pub use record::{LeafId, LeafRecord};
pub use types::{Circle, Viewport};
