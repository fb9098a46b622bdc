use crate::consts::MAX_ABSOLUTE_DIFFERENCE;
use glam::DVec2;

/// Compare the coordinates of two points within `MAX_ABSOLUTE_DIFFERENCE`.
pub(crate) fn compare_points(a: DVec2, b: DVec2) -> bool {
	a.abs_diff_eq(b, MAX_ABSOLUTE_DIFFERENCE)
}

/// Compare two point sequences pairwise within `MAX_ABSOLUTE_DIFFERENCE`.
pub(crate) fn compare_point_sequences(a: &[DVec2], b: &[DVec2]) -> bool {
	a.len() == b.len() && a.iter().zip(b).all(|(a, b)| a.abs_diff_eq(*b, MAX_ABSOLUTE_DIFFERENCE))
}
