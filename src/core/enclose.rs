//! Smallest enclosing circle of a set of circles (Welzl-style incremental basis).
//!
//! The input order is shuffled with a fixed-seed LCG so the expected running time
//! stays linear while results remain reproducible across calls.

use tracing::trace;

use crate::core::types::Circle;

const LCG_MULTIPLIER: u64 = 1_664_525;
const LCG_INCREMENT: u64 = 1_013_904_223;
const LCG_MODULUS: u64 = 1 << 32;
const WEAK_TOLERANCE: f64 = 1e-9;
const WIDEN_SLACK: f64 = 1e-12;

/// Linear congruential generator yielding values in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lcg {
    state: u64,
}

impl Default for Lcg {
    fn default() -> Self {
        Self { state: 1 }
    }
}

impl Lcg {
    pub fn next_unit(&mut self) -> f64 {
        self.state = (LCG_MULTIPLIER * self.state + LCG_INCREMENT) % LCG_MODULUS;
        self.state as f64 / LCG_MODULUS as f64
    }

    /// Fisher-Yates shuffle, walking from the back.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        let mut remaining = items.len();
        while remaining > 0 {
            let pick = (self.next_unit() * remaining as f64) as usize;
            remaining -= 1;
            items.swap(remaining, pick.min(remaining));
        }
    }
}

/// Returns the smallest circle enclosing every circle in `circles`, or `None`
/// for empty input.
///
/// When rounding leaves no exact basis for a new circle, the current enclosing
/// circle is widened to cover it, so the result always encloses the input but
/// may be slightly larger than minimal.
#[must_use]
pub fn enclose(circles: &[Circle], random: &mut Lcg) -> Option<Circle> {
    let mut shuffled = circles.to_vec();
    random.shuffle(&mut shuffled);

    let mut basis: Vec<Circle> = Vec::with_capacity(3);
    let mut enclosing: Option<Circle> = None;
    let mut index = 0;
    while index < shuffled.len() {
        let candidate = shuffled[index];
        match enclosing {
            Some(e) if encloses_weak(e, candidate) => index += 1,
            _ => {
                basis = extend_basis(&basis, candidate, enclosing);
                enclosing = Some(enclose_basis(&basis));
                index = 0;
            }
        }
    }
    enclosing
}

fn extend_basis(basis: &[Circle], p: Circle, current: Option<Circle>) -> Vec<Circle> {
    if encloses_weak_all(p, basis) {
        return vec![p];
    }

    for &b in basis {
        if encloses_not(p, b) && encloses_weak_all(enclose_two(b, p), basis) {
            return vec![b, p];
        }
    }

    for i in 0..basis.len().saturating_sub(1) {
        for j in (i + 1)..basis.len() {
            let (bi, bj) = (basis[i], basis[j]);
            if encloses_not(enclose_two(bi, bj), p)
                && encloses_not(enclose_two(bi, p), bj)
                && encloses_not(enclose_two(bj, p), bi)
                && encloses_weak_all(enclose_three(bi, bj, p), basis)
            {
                return vec![bi, bj, p];
            }
        }
    }

    trace!(basis = basis.len(), "basis lost precision; widening enclosing circle");
    match current {
        Some(e) => {
            let mut grown = enclose_two(e, p);
            grown.r *= 1.0 + WIDEN_SLACK;
            vec![grown]
        }
        None => vec![p],
    }
}

fn encloses_not(a: Circle, b: Circle) -> bool {
    let dr = a.r - b.r;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr < 0.0 || dr * dr < dx * dx + dy * dy
}

/// Containment with a tolerance relative to the larger radius.
fn encloses_weak(a: Circle, b: Circle) -> bool {
    let dr = a.r - b.r + a.r.max(b.r) * WEAK_TOLERANCE;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr >= 0.0 && dr * dr >= dx * dx + dy * dy
}

fn encloses_weak_all(a: Circle, basis: &[Circle]) -> bool {
    basis.iter().all(|&b| encloses_weak(a, b))
}

fn enclose_basis(basis: &[Circle]) -> Circle {
    match basis {
        [a] => *a,
        [a, b] => enclose_two(*a, *b),
        [a, b, c] => enclose_three(*a, *b, *c),
        _ => Circle::new(0.0, 0.0, 0.0),
    }
}

fn enclose_two(a: Circle, b: Circle) -> Circle {
    let x21 = b.x - a.x;
    let y21 = b.y - a.y;
    let r21 = b.r - a.r;
    let l = x21.hypot(y21);
    if l <= 0.0 {
        return if a.r >= b.r { a } else { b };
    }
    Circle::new(
        (a.x + b.x + x21 / l * r21) / 2.0,
        (a.y + b.y + y21 / l * r21) / 2.0,
        (l + a.r + b.r) / 2.0,
    )
}

fn enclose_three(a: Circle, b: Circle, c: Circle) -> Circle {
    let (x1, y1, r1) = (a.x, a.y, a.r);
    let a2 = x1 - b.x;
    let a3 = x1 - c.x;
    let b2 = y1 - b.y;
    let b3 = y1 - c.y;
    let c2 = b.r - r1;
    let c3 = c.r - r1;
    let d1 = x1 * x1 + y1 * y1 - r1 * r1;
    let d2 = d1 - b.x * b.x - b.y * b.y + b.r * b.r;
    let d3 = d1 - c.x * c.x - c.y * c.y + c.r * c.r;
    let ab = a3 * b2 - a2 * b3;
    let xa = (b2 * d3 - b3 * d2) / (ab * 2.0) - x1;
    let xb = (b3 * c2 - b2 * c3) / ab;
    let ya = (a3 * d2 - a2 * d3) / (ab * 2.0) - y1;
    let yb = (a2 * c3 - a3 * c2) / ab;
    let qa = xb * xb + yb * yb - 1.0;
    let qb = 2.0 * (r1 + xa * xb + ya * yb);
    let qc = xa * xa + ya * ya - r1 * r1;
    let r = -(if qa.abs() > 1e-6 {
        (qb + (qb * qb - 4.0 * qa * qc).sqrt()) / (2.0 * qa)
    } else {
        qc / qb
    });
    Circle::new(x1 + xa + xb * r, y1 + ya + yb * r, r)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_circle_encloses_itself() {
        let circle = Circle::new(3.0, -2.0, 5.0);
        let enclosing = enclose(&[circle], &mut Lcg::default()).expect("non-empty");
        assert_eq!(enclosing, circle);
    }

    #[test]
    fn two_touching_circles() {
        let circles = [Circle::new(-1.0, 0.0, 1.0), Circle::new(1.0, 0.0, 1.0)];
        let enclosing = enclose(&circles, &mut Lcg::default()).expect("non-empty");
        assert!((enclosing.r - 2.0).abs() <= 1e-9);
        assert!(enclosing.x.abs() <= 1e-9);
    }

    #[test]
    fn empty_input_has_no_enclosing_circle() {
        assert!(enclose(&[], &mut Lcg::default()).is_none());
    }

    #[test]
    fn lcg_is_reproducible() {
        let mut left = Lcg::default();
        let mut right = Lcg::default();
        for _ in 0..8 {
            assert_eq!(left.next_unit(), right.next_unit());
        }
    }

    #[test]
    fn widely_spread_radii_are_still_enclosed() {
        let circles = [
            Circle::new(0.0, 0.0, 1e150),
            Circle::new(1e150 + 1.0, 0.0, 1.0),
            Circle::new(-1e150 - 1.0, 0.0, 1.0),
            Circle::new(0.0, 1e150, 1e-150),
        ];
        let enclosing = enclose(&circles, &mut Lcg::default()).expect("non-empty");
        assert!(enclosing.is_finite());
        for circle in circles {
            let reach = enclosing.distance_to(circle) + circle.r;
            assert!(reach <= enclosing.r * (1.0 + 1e-8), "reach {reach} > {}", enclosing.r);
        }
    }

    #[test]
    fn concentric_circles_enclose_to_the_larger_one() {
        let circles = [Circle::new(2.0, 2.0, 1.0), Circle::new(2.0, 2.0, 3.0)];
        let enclosing = enclose(&circles, &mut Lcg::default()).expect("non-empty");
        assert_eq!(enclosing, Circle::new(2.0, 2.0, 3.0));
    }
}
