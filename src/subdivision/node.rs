use crate::utils::midpoint;
use glam::DVec2;
use std::cell::OnceCell;

/// The result of splitting a control polygon at the curve's parameter midpoint.
/// The curves described by the two child polygons, concatenated, equal the parent's curve exactly; only flattening to a polyline introduces approximation error.
#[derive(Debug)]
pub struct Split {
	/// Node for the control polygon covering the first half of the parent's parameter range.
	pub left: SubdivisionNode,
	/// The point on the curve at the parent's parameter midpoint.
	pub mid: DVec2,
	/// Node for the control polygon covering the second half of the parent's parameter range.
	pub right: SubdivisionNode,
}

/// A lazily computed binary subdivision of a Bezier control polygon of any degree.
///
/// Each node owns its control polygon, which is never mutated once built. The split into (left child, on-curve midpoint, right child)
/// is computed on first use and cached, so repeated calls return the identical triple and the tree below a node is stable for the
/// node's lifetime. Children are created by the split itself and owned exclusively by their parent.
#[derive(Debug)]
pub struct SubdivisionNode {
	control: Vec<DVec2>,
	split: OnceCell<Box<Split>>,
}

impl SubdivisionNode {
	/// Create a node from the given control polygon of at least two points.
	pub fn new(control: Vec<DVec2>) -> Self {
		debug_assert!(control.len() >= 2, "a subdivision node needs a start and an end anchor");
		Self { control, split: OnceCell::new() }
	}

	/// The first control point: the start anchor of this node's sub-polygon, which lies on the curve.
	pub fn start(&self) -> DVec2 {
		self.control[0]
	}

	/// The last control point: the end anchor of this node's sub-polygon, which lies on the curve.
	pub fn end(&self) -> DVec2 {
		self.control[self.control.len() - 1]
	}

	/// The control polygon this node subdivides.
	pub fn control_points(&self) -> &[DVec2] {
		&self.control
	}

	/// Split the control polygon at t = 0.5 into the polygons of the two half curves and the point on the curve between them.
	/// Computed once; later calls return the cached result.
	pub fn split(&self) -> &Split {
		self.split.get_or_init(|| Box::new(self.compute_split()))
	}

	// One corner-cutting pass of de Casteljau's algorithm at t = 0.5: each reduction step replaces the current polygon with the
	// midpoints of its edges. The first midpoint of every step belongs to the left child's polygon, the last to the right child's.
	fn compute_split(&self) -> Split {
		let count = self.control.len();
		let mut left = Vec::with_capacity(count);
		let mut right = Vec::with_capacity(count);
		let mut current = self.control.clone();
		let mut next = Vec::with_capacity(count - 1);

		left.push(current[0]);
		right.push(current[count - 1]);
		for i in (1..count).rev() {
			for j in 0..i {
				let mid = midpoint(current[j], current[j + 1]);
				if j == 0 {
					left.push(mid);
				}
				if j == i - 1 {
					right.push(mid);
				}
				next.push(mid);
			}
			std::mem::swap(&mut current, &mut next);
			next.clear();
		}

		// The last reduction step leaves the single point on the curve at t = 0.5.
		// The right polygon was collected endpoint-first and reads midpoint-last until reversed.
		right.reverse();
		Split {
			left: SubdivisionNode::new(left),
			mid: current[0],
			right: SubdivisionNode::new(right),
		}
	}

	/// Returns the control polygon produced at each reduction step of this node's subdivision, starting with the node's own
	/// polygon and ending with the single on-curve midpoint. Computed on demand for rendering construction lines; nothing is
	/// retained on the node.
	pub fn de_casteljau_levels(&self) -> Vec<Vec<DVec2>> {
		let mut levels = vec![self.control.clone()];
		while levels.last().unwrap().len() > 1 {
			let next_level = levels.last().unwrap().windows(2).map(|pair| midpoint(pair[0], pair[1])).collect();
			levels.push(next_level);
		}
		levels
	}
}
