use super::curve::SubdivisionCurve;
use super::node::SubdivisionNode;
use crate::consts::{DEFAULT_FLATNESS_TOLERANCE, MAX_SUBDIVISION_DEPTH};
use crate::session::Session;
use crate::utils::manhattan_distance;
use glam::DVec2;
use std::rc::Rc;

/// Options for adaptive refinement.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RefineOptions {
	/// Manhattan distance below which a branch's one-level-deeper midpoint is judged visually coincident with its parent's
	/// midpoint, stopping recursion into that branch. Measured in control point coordinate units. The default value is `0.05`.
	pub tolerance: f64,
	/// Hard ceiling on the nominal refinement depth, so a run terminates for any tolerance and for control polygons (such as
	/// collinear ones) whose midpoints never pass the flatness test. The default value is `25`.
	pub max_depth: u32,
}

impl Default for RefineOptions {
	fn default() -> Self {
		Self {
			tolerance: DEFAULT_FLATNESS_TOLERANCE,
			max_depth: MAX_SUBDIVISION_DEPTH,
		}
	}
}

/// Flatten the subdivision tree under `root` at the given nominal depth, skipping every branch whose one-level-deeper midpoint
/// already lies within `tolerance` Manhattan distance of its parent's midpoint. The traversal order and the anchors are those of
/// [`SubdivisionCurve::generate`]; only the recursion is pruned, so the result is a subsequence of the full flattening.
pub fn adaptive_points(root: &SubdivisionNode, depth: u32, tolerance: f64) -> Vec<DVec2> {
	let mut points = vec![root.start()];
	adaptive_traverse(root, depth, tolerance, &mut points);
	points.push(root.end());
	points
}

fn adaptive_traverse(node: &SubdivisionNode, depth: u32, tolerance: f64, points: &mut Vec<DVec2>) {
	if depth == 0 {
		return;
	}
	let split = node.split();
	if depth > 1 && !is_flat(&split.left, split.mid, tolerance) {
		adaptive_traverse(&split.left, depth - 1, tolerance, points);
	}
	points.push(split.mid);
	if depth > 1 && !is_flat(&split.right, split.mid, tolerance) {
		adaptive_traverse(&split.right, depth - 1, tolerance, points);
	}
}

// The child's midpoint is already memoized one level down, so the test never computes anything a deeper traversal would not.
fn is_flat(child: &SubdivisionNode, parent_mid: DVec2, tolerance: f64) -> bool {
	manhattan_distance(child.split().mid, parent_mid) <= tolerance
}

/// One incremental refinement run against a [`Session`]'s curve.
///
/// Each `next` call is a single refinement step: it produces the adaptive point sequence at the current nominal depth, then
/// raises the depth for the following step. The caller owns the scheduling loop and decides whether and when to pull the next
/// step. A run ends once the curve it captured is no longer the session's current curve (it was superseded by a control point
/// edit), once the nominal depth would exceed `options.max_depth`, or once a step stops adding points over the previous one
/// (every branch has gone flat, so deeper passes would repeat the same sequence).
pub struct Refinement<'a> {
	session: &'a Session,
	curve: Rc<SubdivisionCurve>,
	depth: u32,
	options: RefineOptions,
	previous_len: Option<usize>,
}

impl<'a> Refinement<'a> {
	pub(crate) fn new(session: &'a Session, curve: Rc<SubdivisionCurve>, start_depth: u32, options: RefineOptions) -> Self {
		Self {
			session,
			curve,
			depth: start_depth,
			options,
			previous_len: None,
		}
	}
}

impl Iterator for Refinement<'_> {
	type Item = Vec<DVec2>;

	fn next(&mut self) -> Option<Vec<DVec2>> {
		if !self.session.is_current(&self.curve) {
			log::debug!("refinement superseded at depth {}", self.depth);
			return None;
		}
		if self.depth > self.options.max_depth {
			return None;
		}
		let root = self.curve.root()?;
		let points = adaptive_points(root, self.depth, self.options.tolerance);
		if self.previous_len.is_some_and(|previous| points.len() <= previous) {
			log::trace!("refinement stable at {} points, depth {}", points.len(), self.depth);
			return None;
		}

		self.previous_len = Some(points.len());
		self.depth += 1;
		Some(points)
	}
}

/// Run adaptive refinement to completion, invoking `on_step` with each successive point sequence. The callback runs zero or
/// more times; a run whose curve is replaced mid-way stops without a further call. Callers that want to interleave steps with
/// other work should drive [`Session::refine`] themselves instead.
pub fn refine_incrementally(session: &Session, start_depth: u32, options: RefineOptions, mut on_step: impl FnMut(&[DVec2])) {
	for points in session.refine(start_depth, options) {
		on_step(&points);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn quadratic_control() -> Vec<DVec2> {
		vec![DVec2::new(0., 0.), DVec2::new(200., 200.), DVec2::new(400., 0.)]
	}

	#[test]
	fn test_zero_tolerance_matches_full_generation() {
		let curve = SubdivisionCurve::new(quadratic_control());
		let root = curve.root().unwrap();
		for depth in 0..=6 {
			// No midpoint of this curve coincides with its parent's, so nothing is flat at tolerance zero.
			assert_eq!(adaptive_points(root, depth, 0.), curve.generate(depth));
		}
	}

	#[test]
	fn test_coarser_tolerance_prunes_points() {
		let curve = SubdivisionCurve::new(quadratic_control());
		let root = curve.root().unwrap();

		let fine = adaptive_points(root, 8, 0.05);
		let coarse = adaptive_points(root, 8, 60.);
		assert!(coarse.len() < fine.len());
		assert!(fine.len() <= curve.generate(8).len());
	}

	#[test]
	fn test_point_count_is_monotone_in_tolerance() {
		let curve = SubdivisionCurve::new(quadratic_control());
		let root = curve.root().unwrap();

		let mut previous_len = usize::MAX;
		for tolerance in [0., 0.05, 1., 15., 60., 400.] {
			let len = adaptive_points(root, 8, tolerance).len();
			assert!(len <= previous_len, "tolerance {tolerance} produced {len} points, more than a tighter tolerance");
			previous_len = len;
		}
	}

	#[test]
	fn test_refinement_steps_grow_until_stable() {
		let session = Session::new(quadratic_control());
		let steps: Vec<_> = session.refine(0, RefineOptions { tolerance: 2., max_depth: 25 }).collect();

		assert!(steps.len() >= 2);
		for pair in steps.windows(2) {
			assert!(pair[1].len() > pair[0].len());
		}
		// The run halted on its own, well before the ceiling would have forced 2^25 points.
		let final_len = steps.last().unwrap().len();
		assert!(final_len < 2_usize.pow(14));
	}

	#[test]
	fn test_coincident_control_points_halt_after_one_step() {
		let session = Session::new(vec![DVec2::ZERO, DVec2::ZERO, DVec2::ZERO]);
		let steps: Vec<_> = session.refine(1, RefineOptions { tolerance: 1e-6, max_depth: 25 }).collect();

		assert_eq!(steps.len(), 1);
		assert_eq!(steps[0], vec![DVec2::ZERO, DVec2::ZERO, DVec2::ZERO]);
	}

	#[test]
	fn test_depth_ceiling_bounds_the_run() {
		// A straight segment's midpoints never coincide with their parents', so only the ceiling stops a zero-tolerance run.
		let session = Session::new(vec![DVec2::new(0., 0.), DVec2::new(400., 0.)]);
		let steps: Vec<_> = session.refine(0, RefineOptions { tolerance: 0., max_depth: 6 }).collect();

		assert_eq!(steps.len(), 7);
		assert_eq!(steps.last().unwrap().len(), 2_usize.pow(6) + 1);
	}

	#[test]
	fn test_superseded_run_stops_without_output() {
		let session = Session::new(quadratic_control());
		let mut refinement = session.refine(0, RefineOptions::default());

		assert!(refinement.next().is_some());
		session.set_control_points(vec![DVec2::new(0., 0.), DVec2::new(10., 10.)]);
		assert!(refinement.next().is_none());
		assert!(refinement.next().is_none());
	}

	#[test]
	fn test_refine_incrementally_drives_all_steps() {
		let session = Session::new(quadratic_control());
		let mut lengths = Vec::new();
		refine_incrementally(&session, 0, RefineOptions { tolerance: 2., max_depth: 25 }, |points| lengths.push(points.len()));

		assert!(!lengths.is_empty());
		assert_eq!(lengths[0], 2);
		assert!(lengths.windows(2).all(|pair| pair[1] > pair[0]));
	}

	#[test]
	fn test_empty_curve_refines_to_nothing() {
		let session = Session::new(Vec::new());
		assert_eq!(session.refine(0, RefineOptions::default()).count(), 0);
	}
}
