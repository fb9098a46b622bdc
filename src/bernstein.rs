use glam::DVec2;

/// Evaluate the Bezier curve defined by `control_points` directly in the Bernstein basis, at `sample_count` uniformly spaced
/// interior parameters. The result holds `sample_count + 2` points: the first and last control points are copied exactly
/// (t = 0 and t = 1 never go through the basis formula, so the endpoints carry no floating point error), with the interior
/// samples at `t = i / (sample_count + 1)` between them. Fewer than two control points define no curve and yield an empty
/// result.
pub fn evaluate_direct(control_points: &[DVec2], sample_count: usize) -> Vec<DVec2> {
	if control_points.len() < 2 {
		return Vec::new();
	}
	let degree = control_points.len() - 1;
	let binomials = binomial_row(degree);

	let mut points = Vec::with_capacity(sample_count + 2);
	points.push(control_points[0]);
	for i in 1..=sample_count {
		let t = i as f64 / (sample_count + 1) as f64;
		points.push(bernstein_point(control_points, &binomials, t));
	}
	points.push(control_points[degree]);
	points
}

// The weighted sum sum_j C(n,j) t^j (1-t)^(n-j) P_j. For high degrees the extreme-index weights underflow toward zero at
// moderate t; that accuracy limit is inherent to direct evaluation and distinguishes it from subdivision.
fn bernstein_point(control_points: &[DVec2], binomials: &[f64], t: f64) -> DVec2 {
	let degree = control_points.len() - 1;
	let mut point = DVec2::ZERO;
	for (index, (control_point, binomial)) in control_points.iter().zip(binomials).enumerate() {
		let weight = binomial * t.powi(index as i32) * (1. - t).powi((degree - index) as i32);
		point += *control_point * weight;
	}
	point
}

// The binomial coefficient row C(n, 0..=n), by the additive Pascal recurrence. No factorials are involved, so the row is exact
// as long as the coefficients fit f64's integer range.
fn binomial_row(n: usize) -> Vec<f64> {
	let mut row = vec![0.; n + 1];
	row[0] = 1.;
	for i in 1..=n {
		for j in (1..=i).rev() {
			row[j] += row[j - 1];
		}
	}
	row
}
