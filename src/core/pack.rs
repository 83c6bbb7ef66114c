use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::enclose::{Lcg, enclose};
use crate::core::hierarchy::{HierarchyNode, NodeData};
use crate::core::types::{Circle, Viewport};
use crate::error::{ChartError, ChartResult};

// Relative to the largest sibling radius.
const INTERSECT_EPSILON: f64 = 1e-9;
const PADDING_SLACK: f64 = 1e-6;
const DEFAULT_MAX_PADDING_PASSES: usize = 64;

/// Hierarchy node annotated with its packed circle.
///
/// `x`/`y` are relative to the top-left corner of the packing box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackedNode {
    pub data: NodeData,
    pub value: f64,
    pub depth: usize,
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub children: Vec<PackedNode>,
}

impl PackedNode {
    fn from_hierarchy(node: &HierarchyNode) -> Self {
        let r = if node.is_leaf() {
            leaf_radius(node.value)
        } else {
            0.0
        };
        Self {
            data: node.data.clone(),
            value: node.value,
            depth: node.depth,
            x: 0.0,
            y: 0.0,
            r,
            children: node.children.iter().map(Self::from_hierarchy).collect(),
        }
    }

    #[must_use]
    pub fn circle(&self) -> Circle {
        Circle::new(self.x, self.y, self.r)
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Leaf nodes in pre-order.
    #[must_use]
    pub fn leaves(&self) -> Vec<&PackedNode> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a PackedNode>) {
        if self.is_leaf() {
            if matches!(self.data, NodeData::Leaf(_)) {
                out.push(self);
            }
            return;
        }
        for child in &self.children {
            child.collect_leaves(out);
        }
    }

    fn reset_to(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
        self.r = 0.0;
        for child in &mut self.children {
            child.reset_to(x, y);
        }
    }
}

fn leaf_radius(value: f64) -> f64 {
    let r = value.max(0.0).sqrt();
    if r.is_finite() { r } else { 0.0 }
}

/// Circle-packing capability consumed by the chart.
///
/// Implementations must be deterministic for a fixed input and must keep
/// siblings `padding` apart and children inside their parents.
pub trait PackLayout {
    fn pack(&self, root: &HierarchyNode, size: Viewport, padding: f64) -> ChartResult<PackedNode>;
}

/// Outcome of a padded pack, including how much padding the layout achieved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackReport {
    pub root: PackedNode,
    /// Smallest gap between padded siblings after scale-to-fit, in box units.
    pub achieved_padding: f64,
    pub passes: usize,
    pub converged: bool,
}

/// Front-chain sibling packer with a smallest enclosing circle per parent.
///
/// Padding is expressed in box units: the packer repeats the padded pass until
/// the gap that survives the final scale-to-fit reaches `padding`, bounded by
/// `max_padding_passes`. When the bound is hit first (many leaves crowded into a
/// small box) the last pass is kept and its gap is smaller than requested;
/// [`SiblingPackLayout::pack_with_report`] exposes the gap actually achieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiblingPackLayout {
    max_padding_passes: usize,
}

impl Default for SiblingPackLayout {
    fn default() -> Self {
        Self {
            max_padding_passes: DEFAULT_MAX_PADDING_PASSES,
        }
    }
}

impl SiblingPackLayout {
    #[must_use]
    pub fn with_max_padding_passes(mut self, passes: usize) -> Self {
        self.max_padding_passes = passes.max(1);
        self
    }

    #[must_use]
    pub fn max_padding_passes(self) -> usize {
        self.max_padding_passes
    }

    pub fn pack_with_report(
        &self,
        root: &HierarchyNode,
        size: Viewport,
        padding: f64,
    ) -> ChartResult<PackReport> {
        let size = size.validate()?;
        if !padding.is_finite() || padding < 0.0 {
            return Err(ChartError::InvalidData(
                "pack padding must be finite and >= 0".to_owned(),
            ));
        }

        let mut packed = PackedNode::from_hierarchy(root);
        let base = size.min_side();
        let (cx, cy) = (size.width / 2.0, size.height / 2.0);

        pack_pass(&mut packed, 0.0)?;
        let unpadded_radius = packed.r;
        if !unpadded_radius.is_finite() {
            return Err(ChartError::InvalidData("packed radius overflowed".to_owned()));
        }
        if unpadded_radius <= 0.0 {
            packed.reset_to(cx, cy);
            trace!("zero-weight tree packed at box center");
            return Ok(PackReport {
                root: packed,
                achieved_padding: 0.0,
                passes: 0,
                converged: true,
            });
        }

        let mut achieved = 0.0;
        let mut passes = 0;
        let mut converged = true;
        if padding > 0.0 {
            let mut pad = padding * unpadded_radius / base;
            loop {
                pack_pass(&mut packed, pad)?;
                passes += 1;
                achieved = pad * base / packed.r;
                if achieved >= padding * (1.0 - PADDING_SLACK) {
                    trace!(passes, achieved, "padding converged");
                    break;
                }
                if passes >= self.max_padding_passes {
                    converged = false;
                    warn!(
                        passes,
                        achieved, padding, "padding did not converge; keeping last pass"
                    );
                    break;
                }
                pad = padding * packed.r / base * (1.0 + PADDING_SLACK);
            }
        }

        let k = base / (2.0 * packed.r);
        packed.x = cx;
        packed.y = cy;
        packed.r *= k;
        translate_children(&mut packed, k);
        Ok(PackReport {
            root: packed,
            achieved_padding: achieved,
            passes,
            converged,
        })
    }
}

impl PackLayout for SiblingPackLayout {
    fn pack(&self, root: &HierarchyNode, size: Viewport, padding: f64) -> ChartResult<PackedNode> {
        self.pack_with_report(root, size, padding)
            .map(|report| report.root)
    }
}

/// Post-order pass computing every internal radius and child offsets relative
/// to the parent center. Leaf radii are left untouched.
fn pack_pass(node: &mut PackedNode, pad: f64) -> ChartResult<()> {
    if node.children.is_empty() {
        return Ok(());
    }
    for child in &mut node.children {
        pack_pass(child, pad)?;
    }

    let mut circles: Vec<Circle> = node
        .children
        .iter()
        .map(|child| Circle::new(0.0, 0.0, child.r + pad))
        .collect();
    let mut random = Lcg::default();
    let enclosing = pack_siblings(&mut circles, &mut random)?;
    for (child, circle) in node.children.iter_mut().zip(&circles) {
        child.x = circle.x;
        child.y = circle.y;
    }
    node.r = enclosing + pad;
    Ok(())
}

fn translate_children(node: &mut PackedNode, k: f64) {
    let (px, py) = (node.x, node.y);
    for child in &mut node.children {
        child.x = px + k * child.x;
        child.y = py + k * child.y;
        child.r *= k;
        translate_children(child, k);
    }
}

/// Packs circles tangentially around the origin and returns the enclosing radius.
///
/// Only radii are read; centers are overwritten so that the enclosing circle
/// is centered at `(0, 0)`. Radii are normalized by the largest one while
/// packing, so the layout does not depend on the magnitude of the input.
pub fn pack_siblings(circles: &mut [Circle], random: &mut Lcg) -> ChartResult<f64> {
    if circles.iter().any(|circle| !circle.r.is_finite() || circle.r < 0.0) {
        return Err(ChartError::InvalidData(
            "sibling radii must be finite and >= 0".to_owned(),
        ));
    }

    let scale = circles.iter().map(|circle| circle.r).fold(0.0, f64::max);
    if scale <= 0.0 {
        for circle in circles.iter_mut() {
            circle.x = 0.0;
            circle.y = 0.0;
        }
        return Ok(0.0);
    }

    let radii: Vec<f64> = circles.iter().map(|circle| circle.r).collect();
    for circle in circles.iter_mut() {
        circle.r /= scale;
    }
    let enclosing = pack_unit_siblings(circles, random)?;
    for (circle, r) in circles.iter_mut().zip(radii) {
        circle.x *= scale;
        circle.y *= scale;
        circle.r = r;
    }
    Ok(enclosing * scale)
}

/// Front-chain packing of circles whose largest radius is 1.
fn pack_unit_siblings(circles: &mut [Circle], random: &mut Lcg) -> ChartResult<f64> {
    let n = circles.len();
    if n == 0 {
        return Ok(0.0);
    }

    circles[0].x = 0.0;
    circles[0].y = 0.0;
    if n == 1 {
        return Ok(circles[0].r);
    }

    circles[0].x = -circles[1].r;
    circles[1].x = circles[0].r;
    circles[1].y = 0.0;
    if n == 2 {
        return Ok(circles[0].r + circles[1].r);
    }

    circles[2] = place(circles[1], circles[0], circles[2]);

    // Front chain as a circular doubly-linked list over circle indices.
    let mut next = vec![0usize; n];
    let mut prev = vec![0usize; n];
    next[0] = 1;
    prev[1] = 0;
    next[1] = 2;
    prev[2] = 1;
    next[2] = 0;
    prev[0] = 2;

    // Every retry drops chain circles, so a consistent chain settles well
    // within this many placements.
    let budget = n * n + n;
    let mut attempts = 0usize;

    let (mut a, mut b) = (0usize, 1usize);
    let mut i = 3;
    'pack: while i < n {
        attempts += 1;
        if attempts > budget {
            warn!(
                placed = i,
                total = n,
                "front chain did not settle; lining up remaining circles"
            );
            return line_up_remaining(circles, i, random);
        }

        circles[i] = place(circles[a], circles[b], circles[i]);
        let c = i;

        // Nearest intersecting chain circle, measured by arc length along the chain.
        let (mut j, mut k) = (next[b], prev[a]);
        let (mut sj, mut sk) = (circles[b].r, circles[a].r);
        loop {
            if sj <= sk {
                if intersects(circles[j], circles[c]) {
                    b = j;
                    next[a] = b;
                    prev[b] = a;
                    continue 'pack;
                }
                sj += circles[j].r;
                j = next[j];
            } else {
                if intersects(circles[k], circles[c]) {
                    a = k;
                    next[a] = b;
                    prev[b] = a;
                    continue 'pack;
                }
                sk += circles[k].r;
                k = prev[k];
            }
            if j == next[k] {
                break;
            }
        }

        prev[c] = a;
        next[c] = b;
        next[a] = c;
        prev[b] = c;
        b = c;

        let mut best = a;
        let mut best_score = score(circles, &next, a);
        let mut cursor = next[c];
        while cursor != b {
            let candidate = score(circles, &next, cursor);
            if candidate < best_score {
                best = cursor;
                best_score = candidate;
            }
            cursor = next[cursor];
        }
        a = best;
        b = next[a];
        i += 1;
    }

    let mut chain = vec![circles[b]];
    let mut cursor = next[b];
    while cursor != b {
        chain.push(circles[cursor]);
        cursor = next[cursor];
    }
    center_on_enclosing(circles, &chain, random)
}

/// Lines `circles[from..]` up on the x axis right of every placed circle.
fn line_up_remaining(
    circles: &mut [Circle],
    from: usize,
    random: &mut Lcg,
) -> ChartResult<f64> {
    let mut edge = circles[..from]
        .iter()
        .map(|circle| circle.x + circle.r)
        .fold(f64::NEG_INFINITY, f64::max);
    for circle in &mut circles[from..] {
        circle.x = edge + circle.r;
        circle.y = 0.0;
        edge = circle.x + circle.r;
    }
    let hull = circles.to_vec();
    center_on_enclosing(circles, &hull, random)
}

/// Shifts `circles` so the circle enclosing `hull` sits at the origin.
fn center_on_enclosing(
    circles: &mut [Circle],
    hull: &[Circle],
    random: &mut Lcg,
) -> ChartResult<f64> {
    let enclosing = enclose(hull, random).ok_or_else(|| {
        ChartError::InvalidData("front chain must not be empty".to_owned())
    })?;
    for circle in circles.iter_mut() {
        circle.x -= enclosing.x;
        circle.y -= enclosing.y;
    }
    Ok(enclosing.r)
}

/// Places `c` tangent to both `a` and `b`.
fn place(b: Circle, a: Circle, c: Circle) -> Circle {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let d2 = dx * dx + dy * dy;
    if d2 <= 0.0 {
        return Circle::new(a.x + c.r, a.y, c.r);
    }

    let a2 = (a.r + c.r) * (a.r + c.r);
    let b2 = (b.r + c.r) * (b.r + c.r);
    if a2 > b2 {
        let x = (d2 + b2 - a2) / (2.0 * d2);
        let y = (b2 / d2 - x * x).max(0.0).sqrt();
        Circle::new(b.x - x * dx - y * dy, b.y - x * dy + y * dx, c.r)
    } else {
        let x = (d2 + a2 - b2) / (2.0 * d2);
        let y = (a2 / d2 - x * x).max(0.0).sqrt();
        Circle::new(a.x + x * dx - y * dy, a.y + x * dy + y * dx, c.r)
    }
}

fn intersects(a: Circle, b: Circle) -> bool {
    let dr = a.r + b.r - INTERSECT_EPSILON;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr > 0.0 && dr * dr > dx * dx + dy * dy
}

/// Squared distance from the origin to the weighted midpoint of a chain pair.
fn score(circles: &[Circle], next: &[usize], node: usize) -> f64 {
    let a = circles[node];
    let b = circles[next[node]];
    let ab = a.r + b.r;
    let dx = (a.x * b.r + b.x * a.r) / ab;
    let dy = (a.y * b.r + b.y * a.r) / ab;
    dx * dx + dy * dy
}
