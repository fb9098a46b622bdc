use super::curve::SubdivisionCurve;
use crate::session::Session;
use crate::utils::midpoint;
use glam::DVec2;
use std::rc::Rc;

/// One animated transition of a [`Session`]'s curve from the flattening at `depth` to the flattening at `depth + 1`.
///
/// Subdividing one level deeper doubles the segment count, so the point count jumps discretely between depths. The animation
/// disguises that jump: every frame keeps the points of the coarser flattening fixed at their even indices, while the newly
/// inserted odd-indexed points travel from the naive midpoint of their segment (where a straight-line subdivision would put
/// them) to their true position on the curve. The final frame equals the deeper flattening exactly.
///
/// Frames are pulled one at a time, with the caller deciding when to render the next one. Like a refinement run, an animation
/// lapses without further frames once its curve is no longer the session's current curve.
pub struct Animation<'a> {
	session: &'a Session,
	curve: Rc<SubdivisionCurve>,
	next: Vec<DVec2>,
	naive_mids: Vec<DVec2>,
	frame: u32,
	frame_count: u32,
}

impl<'a> Animation<'a> {
	pub(crate) fn new(session: &'a Session, curve: Rc<SubdivisionCurve>, depth: u32, frame_count: u32) -> Self {
		let prev = curve.generate(depth);
		let next = if prev.is_empty() { Vec::new() } else { curve.generate(depth + 1) };
		let naive_mids = prev.windows(2).map(|pair| midpoint(pair[0], pair[1])).collect();
		Self {
			session,
			curve,
			next,
			naive_mids,
			frame: 0,
			frame_count,
		}
	}

	/// The number of frames this animation produces in total.
	pub fn frame_count(&self) -> u32 {
		if self.next.is_empty() { 0 } else { self.frame_count }
	}
}

impl Iterator for Animation<'_> {
	type Item = Vec<DVec2>;

	fn next(&mut self) -> Option<Vec<DVec2>> {
		if self.next.is_empty() || self.frame >= self.frame_count {
			return None;
		}
		if !self.session.is_current(&self.curve) {
			log::debug!("animation superseded at frame {} of {}", self.frame, self.frame_count);
			return None;
		}

		self.frame += 1;
		if self.frame == self.frame_count {
			// Land bit-exactly on the deeper flattening rather than on a lerp endpoint.
			return Some(self.next.clone());
		}

		let t = f64::from(self.frame) / f64::from(self.frame_count);
		let mut frame = self.next.clone();
		for (index, naive) in self.naive_mids.iter().enumerate() {
			frame[2 * index + 1] = naive.lerp(self.next[2 * index + 1], t);
		}
		Some(frame)
	}
}

/// Drive one depth transition to completion, invoking `on_frame` with up to `frame_count` frames. The callback is not invoked
/// further once the session's curve is replaced. Callers that schedule rendering themselves should drive [`Session::animate`]
/// one frame at a time instead.
pub fn animate_transition(session: &Session, depth: u32, frame_count: u32, mut on_frame: impl FnMut(&[DVec2])) {
	for frame in session.animate(depth, frame_count) {
		on_frame(&frame);
	}
}
