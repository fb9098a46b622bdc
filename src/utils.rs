use glam::DVec2;

/// The point halfway between `a` and `b`.
#[inline]
pub fn midpoint(a: DVec2, b: DVec2) -> DVec2 {
	a.lerp(b, 0.5)
}

/// The Manhattan distance `|ax - bx| + |ay - by|` between two points.
#[inline]
pub fn manhattan_distance(a: DVec2, b: DVec2) -> f64 {
	(a.x - b.x).abs() + (a.y - b.y).abs()
}
