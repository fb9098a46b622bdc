use crate::consts::DEFAULT_FRAME_COUNT;
use crate::subdivision::{Animation, RefineOptions, Refinement, SubdivisionCurve};
use glam::DVec2;
use std::cell::RefCell;
use std::rc::Rc;

/// Tracks the current curve across control point edits and hands out refinement and animation runs that lapse once the curve
/// they captured has been replaced.
///
/// Everything here is single threaded and cooperative. Runs are pull-driven iterators: the caller owns the scheduling loop
/// (a frame callback, a timer, a plain `for`) and the engine only ever computes between pulls. There is no cancellation flag to
/// signal; a run checks that its captured curve is still the session's current one, by identity, before producing each output,
/// so no partial result is emitted for a superseded curve.
#[derive(Debug)]
pub struct Session {
	curve: RefCell<Rc<SubdivisionCurve>>,
}

impl Session {
	/// Start a session over the given control points.
	pub fn new(control_points: Vec<DVec2>) -> Self {
		Self {
			curve: RefCell::new(Rc::new(SubdivisionCurve::new(control_points))),
		}
	}

	/// A snapshot of the current curve. Snapshots are immutable: holding one never observes later edits, and the subdivision
	/// tree it carries stays valid (and memoized) for as long as the snapshot is kept.
	pub fn curve(&self) -> Rc<SubdivisionCurve> {
		self.curve.borrow().clone()
	}

	/// Replace the control points wholesale. The previous curve's subdivision tree is released with its last snapshot, and
	/// every outstanding refinement or animation run stops before its next output.
	pub fn set_control_points(&self, control_points: Vec<DVec2>) {
		log::trace!("session curve replaced ({} control points)", control_points.len());
		*self.curve.borrow_mut() = Rc::new(SubdivisionCurve::new(control_points));
	}

	/// Whether `curve` is still the session's current curve, compared by identity rather than by value.
	pub fn is_current(&self, curve: &Rc<SubdivisionCurve>) -> bool {
		Rc::ptr_eq(curve, &*self.curve.borrow())
	}

	/// Begin an incremental refinement run against the current curve, starting at the given nominal depth.
	pub fn refine(&self, start_depth: u32, options: RefineOptions) -> Refinement<'_> {
		Refinement::new(self, self.curve(), start_depth, options)
	}

	/// Begin an animated transition of the current curve from `depth` to `depth + 1`, spread over `frame_count` frames.
	pub fn animate(&self, depth: u32, frame_count: u32) -> Animation<'_> {
		Animation::new(self, self.curve(), depth, frame_count)
	}

	/// [`Session::animate`] with the default frame count of 30.
	pub fn animate_default(&self, depth: u32) -> Animation<'_> {
		self.animate(depth, DEFAULT_FRAME_COUNT)
	}
}
