use super::node::SubdivisionNode;
use crate::consts::MAX_SUBDIVISION_DEPTH;
use glam::DVec2;

/// A Bezier curve of arbitrary degree, flattened to a polyline by recursive midpoint subdivision.
///
/// The curve owns the root of a lazily grown, memoized subdivision tree, so deeper flattenings reuse every split computed by
/// shallower ones. `generate` itself is a pure function of the tree and the requested depth: the same curve and depth always
/// produce the identical point sequence.
#[derive(Debug)]
pub struct SubdivisionCurve {
	control: Vec<DVec2>,
	root: Option<SubdivisionNode>,
}

impl SubdivisionCurve {
	/// Build a curve from an ordered control point sequence. Never fails: fewer than two control points define no drawable
	/// curve, and every `generate` call on such a curve yields an empty sequence.
	pub fn new(control_points: Vec<DVec2>) -> Self {
		let root = (control_points.len() >= 2).then(|| SubdivisionNode::new(control_points.clone()));
		Self { control: control_points, root }
	}

	/// The control points this curve was built from.
	pub fn control_points(&self) -> &[DVec2] {
		&self.control
	}

	/// Whether the curve has no drawable output (fewer than two control points).
	pub fn is_empty(&self) -> bool {
		self.root.is_none()
	}

	/// The root of the subdivision tree, if the curve is drawable. Exposed so a rendering layer can pull diagnostic
	/// construction polygons from individual nodes without the curve knowing about the renderer.
	pub fn root(&self) -> Option<&SubdivisionNode> {
		self.root.as_ref()
	}

	/// The number of points a full traversal at `depth` produces: 2^depth + 1, saturating, or 0 for a curve with no drawable output.
	pub fn point_count(&self, depth: u32) -> usize {
		if self.root.is_none() {
			return 0;
		}
		1_usize.checked_shl(depth).map_or(usize::MAX, |segments| segments.saturating_add(1))
	}

	/// Flatten the curve to a polyline at the given depth: the two exact endpoint anchors around an in-order traversal of the
	/// subdivision tree truncated `depth` levels down. Depth 0 is the straight line between the anchors; each additional level
	/// doubles the segment count by inserting the on-curve midpoint of every segment.
	pub fn generate(&self, depth: u32) -> Vec<DVec2> {
		let Some(root) = &self.root else { return Vec::new() };

		let mut points = Vec::with_capacity(self.point_count(depth.min(MAX_SUBDIVISION_DEPTH)));
		points.push(root.start());
		traverse(root, depth, &mut points);
		points.push(root.end());
		points
	}
}

fn traverse(node: &SubdivisionNode, depth: u32, points: &mut Vec<DVec2>) {
	if depth == 0 {
		return;
	}
	let split = node.split();
	traverse(&split.left, depth - 1, points);
	points.push(split.mid);
	traverse(&split.right, depth - 1, points);
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::compare::compare_points;

	fn quadratic() -> SubdivisionCurve {
		SubdivisionCurve::new(vec![DVec2::new(0., 0.), DVec2::new(200., 200.), DVec2::new(400., 0.)])
	}

	#[test]
	fn test_point_count_is_exponential() {
		let quintic = SubdivisionCurve::new(vec![
			DVec2::new(0., 0.),
			DVec2::new(1., 8.),
			DVec2::new(3., -2.),
			DVec2::new(5., 6.),
			DVec2::new(8., 8.),
			DVec2::new(10., 0.),
		]);
		for depth in 0..=6 {
			let expected = 2_usize.pow(depth) + 1;
			assert_eq!(quadratic().generate(depth).len(), expected);
			assert_eq!(quintic.generate(depth).len(), expected);
			assert_eq!(quintic.point_count(depth), expected);
		}
	}

	#[test]
	fn test_depth_zero_is_the_anchor_segment() {
		let curve = quadratic();
		assert_eq!(curve.generate(0), vec![DVec2::new(0., 0.), DVec2::new(400., 0.)]);
	}

	#[test]
	fn test_depth_one_quadratic() {
		let curve = quadratic();
		assert_eq!(curve.generate(1), vec![DVec2::new(0., 0.), DVec2::new(200., 100.), DVec2::new(400., 0.)]);
	}

	#[test]
	fn test_endpoints_are_invariant_at_every_depth() {
		let curve = SubdivisionCurve::new(vec![DVec2::new(0.3, -1.7), DVec2::new(55.5, 21.9), DVec2::new(-13.1, 8.8), DVec2::new(70.7, 0.2)]);
		for depth in 0..=8 {
			let points = curve.generate(depth);
			assert_eq!(points[0], DVec2::new(0.3, -1.7));
			assert_eq!(points[points.len() - 1], DVec2::new(70.7, 0.2));
		}
	}

	#[test]
	fn test_generate_is_deterministic() {
		let curve = quadratic();
		assert_eq!(curve.generate(5), curve.generate(5));

		// A second curve over the same control points builds an independent tree but must agree bit for bit.
		let other = quadratic();
		assert_eq!(curve.generate(5), other.generate(5));
	}

	#[test]
	fn test_deeper_generation_refines_in_place() {
		let curve = quadratic();
		let coarse = curve.generate(3);
		let fine = curve.generate(4);

		// One level deeper doubles the segment count, keeping every coarse point at its even index.
		assert_eq!(fine.len(), 2 * coarse.len() - 1);
		for (index, point) in coarse.iter().enumerate() {
			assert_eq!(fine[2 * index], *point);
		}
	}

	#[test]
	fn test_subdivided_points_lie_on_the_curve() {
		let curve = quadratic();
		let control = curve.control_points().to_vec();
		let points = curve.generate(4);
		for (k, point) in points.iter().enumerate() {
			let t = k as f64 / 16.;
			let reference = control[0] * (1. - t) * (1. - t) + control[1] * 2. * t * (1. - t) + control[2] * t * t;
			assert!(compare_points(*point, reference), "point {k} drifted off the quadratic");
		}
	}

	#[test]
	fn test_coincident_control_points_collapse() {
		let curve = SubdivisionCurve::new(vec![DVec2::ZERO, DVec2::ZERO, DVec2::ZERO]);
		for depth in 0..=4 {
			let points = curve.generate(depth);
			assert_eq!(points.len(), 2_usize.pow(depth) + 1);
			assert!(points.iter().all(|point| *point == DVec2::ZERO));
		}
	}

	#[test]
	fn test_too_few_control_points_are_no_curve() {
		let empty = SubdivisionCurve::new(Vec::new());
		let single = SubdivisionCurve::new(vec![DVec2::new(3., 4.)]);

		assert!(empty.is_empty());
		assert!(single.is_empty());
		assert_eq!(empty.point_count(4), 0);
		for depth in 0..=3 {
			assert!(empty.generate(depth).is_empty());
			assert!(single.generate(depth).is_empty());
		}
	}
}
