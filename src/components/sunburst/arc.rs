//! Arc geometry for a laid out node under the current scales.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt::Write as _;

use super::partition::LayoutNode;
use super::scale::{LinearScale, SqrtScale};

// Spans this close to a full turn are drawn as a ring.
const FULL_TURN: f64 = TAU - 1e-6;

/// Angles in radians, clockwise from 12 o'clock. Radii in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ArcGeometry {
	pub start_angle: f64,
	pub end_angle: f64,
	pub inner_radius: f64,
	pub outer_radius: f64,
}

impl ArcGeometry {
	pub fn span(&self) -> f64 {
		(self.end_angle - self.start_angle).abs()
	}

	pub fn is_empty(&self) -> bool {
		self.span() <= 0.0 || self.outer_radius <= self.inner_radius
	}

	/// Whether the polar point `(angle, radius)` falls inside this arc.
	pub fn contains(&self, angle: f64, radius: f64) -> bool {
		if self.is_empty() || radius < self.inner_radius || radius >= self.outer_radius {
			return false;
		}
		if self.span() >= FULL_TURN {
			return true;
		}
		let (lo, hi) = if self.start_angle <= self.end_angle {
			(self.start_angle, self.end_angle)
		} else {
			(self.end_angle, self.start_angle)
		};
		angle >= lo && angle < hi
	}
}

/// Converts an offset from the chart centre (canvas axes, y down) into the
/// polar coordinates used by [`ArcGeometry`].
pub fn to_polar(dx: f64, dy: f64) -> (f64, f64) {
	let angle = dx.atan2(-dy).rem_euclid(TAU);
	(angle, dx.hypot(dy))
}

/// Maps a node through the angular and radial scales.
///
/// The results are clamped to `[0, 2π]` and `>= 0` so nodes pushed outside
/// the visible domain during a zoom collapse instead of wrapping around.
pub fn arc_geometry(node: &LayoutNode, x: &LinearScale, y: &SqrtScale) -> ArcGeometry {
	ArcGeometry {
		start_angle: x.apply(node.x).clamp(0.0, TAU),
		end_angle: x.apply(node.x + node.dx).clamp(0.0, TAU),
		inner_radius: y.apply(node.y).max(0.0),
		outer_radius: y.apply(node.y + node.dy).max(0.0),
	}
}

/// Renders the arc as SVG path data centred on the origin.
pub fn arc_path(arc: &ArcGeometry) -> String {
	let (r0, r1) = (arc.inner_radius, arc.outer_radius);
	let (a0, a1) = (arc.start_angle - FRAC_PI_2, arc.end_angle - FRAC_PI_2);
	let (a0, a1) = if a1 < a0 { (a1, a0) } else { (a0, a1) };
	let da = a1 - a0;
	let mut d = String::new();

	if da >= FULL_TURN {
		let _ = write!(d, "M0,{r1}A{r1},{r1} 0 1,1 0,{}A{r1},{r1} 0 1,1 0,{r1}", -r1);
		if r0 > 0.0 {
			let _ = write!(d, "M0,{r0}A{r0},{r0} 0 1,0 0,{}A{r0},{r0} 0 1,0 0,{r0}", -r0);
		}
		d.push('Z');
		return d;
	}

	let large = if da < PI { 0 } else { 1 };
	let (c0, s0, c1, s1) = (a0.cos(), a0.sin(), a1.cos(), a1.sin());
	let _ = write!(
		d,
		"M{},{}A{r1},{r1} 0 {large},1 {},{}",
		r1 * c0,
		r1 * s0,
		r1 * c1,
		r1 * s1
	);
	if r0 > 0.0 {
		let _ = write!(
			d,
			"L{},{}A{r0},{r0} 0 {large},0 {},{}",
			r0 * c1,
			r0 * s1,
			r0 * c0,
			r0 * s0
		);
	} else {
		d.push_str("L0,0");
	}
	d.push('Z');
	d
}
