use crate::bernstein::evaluate_direct;
use crate::subdivision::SubdivisionCurve;
use glam::DVec2;
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

/// The closed set of polyline generation strategies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
	/// Lazy recursive midpoint subdivision, flattened at increasing depth until the target is passed.
	Subdivision,
	/// Direct evaluation of the Bernstein polynomial at exactly the number of samples the target asks for.
	Bernstein,
}

impl Strategy {
	/// The identifier used to select this strategy and to label benchmark output.
	pub fn name(self) -> &'static str {
		match self {
			Strategy::Subdivision => "subdivision",
			Strategy::Bernstein => "bernstein",
		}
	}
}

impl fmt::Display for Strategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Error returned when a strategy identifier names no known strategy.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown strategy identifier {0:?}")]
pub struct UnknownStrategy(pub String);

impl FromStr for Strategy {
	type Err = UnknownStrategy;

	fn from_str(identifier: &str) -> Result<Self, UnknownStrategy> {
		match identifier {
			"subdivision" => Ok(Strategy::Subdivision),
			"bernstein" => Ok(Strategy::Bernstein),
			_ => Err(UnknownStrategy(identifier.to_string())),
		}
	}
}

/// The outcome of driving one strategy toward a target output point count.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BenchmarkResult {
	/// The strategy that was measured.
	pub strategy: Strategy,
	/// Number of points the strategy ended up producing.
	pub point_count: usize,
	/// Signed excess of `point_count` over the requested target. Subdivision generally overshoots because its output sizes are
	/// 2^depth + 1; direct evaluation can hit a target exactly.
	pub overshoot: i64,
	/// Wall-clock time spent in the evaluation itself, excluding curve construction.
	pub elapsed: Duration,
}

impl BenchmarkResult {
	/// The elapsed evaluation time in milliseconds.
	pub fn elapsed_ms(&self) -> f64 {
		self.elapsed.as_secs_f64() * 1000.
	}
}

/// Measure how `strategy` reaches a polyline of more than `target_point_count` points over `control_points`.
///
/// Subdivision searches upward from depth 0, regenerating at each depth until the output exceeds the target; the memoized tree
/// makes each regeneration incremental. Direct evaluation needs no search, since its output length is an explicit function of
/// the requested sample count. Timing wraps only the evaluation work; building the curve is setup and not measured.
pub fn benchmark(strategy: Strategy, control_points: &[DVec2], target_point_count: usize) -> BenchmarkResult {
	let (point_count, elapsed) = match strategy {
		Strategy::Subdivision => {
			let curve = SubdivisionCurve::new(control_points.to_vec());
			let start = Instant::now();
			let mut points = curve.generate(0);
			let mut depth = 0;
			// Output length grows as 2^depth + 1, so the search terminates; a curve with no drawable output reports zero
			// points instead of looping.
			while !points.is_empty() && points.len() <= target_point_count {
				depth += 1;
				points = curve.generate(depth);
			}
			(points.len(), start.elapsed())
		}
		Strategy::Bernstein => {
			let start = Instant::now();
			let points = evaluate_direct(control_points, target_point_count.saturating_sub(2));
			(points.len(), start.elapsed())
		}
	};

	let result = BenchmarkResult {
		strategy,
		point_count,
		overshoot: point_count as i64 - target_point_count as i64,
		elapsed,
	};
	log::debug!("{strategy} produced {point_count} points for a target of {target_point_count} in {:.3} ms", result.elapsed_ms());
	result
}
