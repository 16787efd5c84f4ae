use std::f64::consts::TAU;

use log::debug;

use super::arc::{ArcGeometry, arc_geometry, to_polar};
use super::config::SunburstConfig;
use super::partition::{Layout, LayoutNode, NodeIdx};
use super::scale::{LinearScale, SqrtScale, lerp_pair};

/// Cubic in-out easing.
pub fn ease_cubic_in_out(t: f64) -> f64 {
	let t = t.clamp(0.0, 1.0);
	if t < 0.5 {
		4.0 * t * t * t
	} else {
		1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
	}
}

/// Text shown next to the chart for the hovered node.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverLabel {
	pub text: String,
	pub value: Option<f64>,
}

/// An in-flight zoom: scale domains and the radial range interpolated
/// between two endpoints over `duration` seconds.
#[derive(Clone, Debug)]
pub struct ZoomTransition {
	pub target: NodeIdx,
	x_domain: [[f64; 2]; 2],
	y_domain: [[f64; 2]; 2],
	y_range: [[f64; 2]; 2],
	elapsed: f64,
	duration: f64,
}

impl ZoomTransition {
	pub fn progress(&self) -> f64 {
		if self.duration <= 0.0 {
			1.0
		} else {
			(self.elapsed / self.duration).min(1.0)
		}
	}

	fn is_done(&self) -> bool {
		self.progress() >= 1.0
	}

	/// Domains and range at eased time `t`; exact endpoints at `t >= 1`.
	fn sample(&self, t: f64) -> ([f64; 2], [f64; 2], [f64; 2]) {
		if t >= 1.0 {
			return (self.x_domain[1], self.y_domain[1], self.y_range[1]);
		}
		(
			lerp_pair(self.x_domain[0], self.x_domain[1], t),
			lerp_pair(self.y_domain[0], self.y_domain[1], t),
			lerp_pair(self.y_range[0], self.y_range[1], t),
		)
	}
}

pub struct SunburstState {
	pub layout: Layout,
	pub config: SunburstConfig,
	/// Angular scale: layout `x` to radians.
	pub x: LinearScale,
	/// Radial scale: layout `y` to pixels.
	pub y: SqrtScale,
	pub transition: Option<ZoomTransition>,
	pub hover: Option<NodeIdx>,
	pub width: f64,
	pub height: f64,
	/// Last pointer position over the canvas, if any.
	pointer: Option<(f64, f64)>,
	label: HoverLabel,
	label_changed: bool,
	needs_redraw: bool,
}

impl SunburstState {
	pub fn new(layout: Layout, config: SunburstConfig) -> Self {
		let radius = config.radius();
		let label = HoverLabel {
			text: config.placeholder.clone(),
			value: None,
		};
		Self {
			layout,
			x: LinearScale::new([0.0, 1.0], [0.0, TAU]),
			y: SqrtScale::new([0.0, 1.0], [0.0, radius]),
			transition: None,
			hover: None,
			width: config.width,
			height: config.height,
			pointer: None,
			label,
			label_changed: false,
			needs_redraw: true,
			config,
		}
	}

	pub fn radius(&self) -> f64 {
		self.width.min(self.height) / 2.0
	}

	pub fn center(&self) -> (f64, f64) {
		(
			self.width / 2.0,
			self.height / 2.0 + self.config.center_offset_y,
		)
	}

	pub fn node(&self, idx: NodeIdx) -> Option<&LayoutNode> {
		self.layout.get(idx)
	}

	#[cfg(test)]
	pub fn arc(&self, idx: NodeIdx) -> Option<ArcGeometry> {
		self.layout
			.get(idx)
			.map(|node| arc_geometry(node, &self.x, &self.y))
	}

	/// Geometry of every node under the current scales, in draw order.
	pub fn arcs(&self) -> impl Iterator<Item = (NodeIdx, &LayoutNode, ArcGeometry)> + '_ {
		self.layout
			.nodes()
			.iter()
			.enumerate()
			.map(|(idx, node)| (idx, node, arc_geometry(node, &self.x, &self.y)))
	}

	pub fn is_animating(&self) -> bool {
		self.transition.is_some()
	}

	/// Starts zooming so that `idx` fills the full circle.
	///
	/// A transition already in flight is replaced; the new one starts from
	/// the scales as they stand at this frame.
	pub fn zoom_to(&mut self, idx: NodeIdx) {
		let Some(node) = self.layout.get(idx) else {
			return;
		};
		debug!(
			"zoom to {:?} (x={}, dx={}, y={}, value={})",
			node.name, node.x, node.dx, node.y, node.value
		);
		if self.transition.is_some() {
			debug!("replacing in-flight zoom transition");
		}
		let hole = if node.y != 0.0 {
			self.config.hole_radius
		} else {
			0.0
		};
		self.transition = Some(ZoomTransition {
			target: idx,
			x_domain: [self.x.domain, [node.x, node.x + node.dx]],
			y_domain: [self.y.domain, [node.y, 1.0]],
			y_range: [self.y.range, [hole, self.radius()]],
			elapsed: 0.0,
			duration: self.config.duration,
		});
		// Zero-length transitions jump straight to the target.
		self.tick(0.0);
	}

	/// Advances the running transition by `dt` seconds, updating the shared
	/// scales once for this frame.
	pub fn tick(&mut self, dt: f64) {
		let Some(transition) = self.transition.as_mut() else {
			return;
		};
		transition.elapsed += dt.max(0.0);
		let t = ease_cubic_in_out(transition.progress());
		let (x_domain, y_domain, y_range) = transition.sample(t);
		let done = transition.is_done();
		self.x.domain = x_domain;
		self.y.domain = y_domain;
		self.y.range = y_range;
		self.needs_redraw = true;
		if done {
			if let Some(finished) = self.transition.take() {
				debug!("zoom to node {} finished", finished.target);
			}
			// Arcs moved under a still pointer.
			if let Some((sx, sy)) = self.pointer {
				let hovered = self.node_at_position(sx, sy);
				self.set_hover(hovered);
			}
		}
	}

	/// Returns whether the chart changed since the last call.
	pub fn take_redraw(&mut self) -> bool {
		std::mem::take(&mut self.needs_redraw)
	}

	/// The new label, once per change.
	pub fn take_label_change(&mut self) -> Option<HoverLabel> {
		std::mem::take(&mut self.label_changed).then(|| self.label.clone())
	}

	/// Records the pointer at `(sx, sy)` and hovers the node under it.
	pub fn pointer_moved(&mut self, sx: f64, sy: f64) {
		self.pointer = Some((sx, sy));
		let hovered = self.node_at_position(sx, sy);
		self.set_hover(hovered);
	}

	pub fn pointer_left(&mut self) {
		self.pointer = None;
		self.set_hover(None);
	}

	/// Node under the canvas position `(sx, sy)`, deepest first.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<NodeIdx> {
		let (cx, cy) = self.center();
		let (angle, radius) = to_polar(sx - cx, sy - cy);
		self.arcs()
			.filter(|(_, _, arc)| arc.contains(angle, radius))
			.map(|(idx, _, _)| idx)
			.last()
	}

	/// Updates the hovered node. Returns whether the label changed.
	pub fn set_hover(&mut self, node: Option<NodeIdx>) -> bool {
		if self.hover == node {
			return false;
		}
		self.hover = node;
		let label = match node.and_then(|idx| self.layout.get(idx)) {
			Some(n) => HoverLabel {
				text: n.name.clone(),
				value: Some(n.value),
			},
			None => HoverLabel {
				text: self.config.placeholder.clone(),
				value: None,
			},
		};
		let changed = label != self.label;
		self.label = label;
		self.label_changed |= changed;
		changed
	}

	pub fn label(&self) -> &HoverLabel {
		&self.label
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::sunburst::partition::compute_layout;
	use crate::components::sunburst::types::TreeNode;

	fn state() -> SunburstState {
		let root = TreeNode::branch(
			"root",
			vec![
				TreeNode::branch(
					"photos",
					vec![TreeNode::leaf("a.png", 10.0), TreeNode::leaf("b.png", 30.0)],
				),
				TreeNode::leaf("notes.txt", 40.0),
			],
		);
		SunburstState::new(compute_layout(&root), SunburstConfig::default())
	}

	fn run_to_end(s: &mut SunburstState) {
		while s.is_animating() {
			s.tick(0.016);
		}
	}

	#[test]
	fn easing_endpoints() {
		assert_eq!(ease_cubic_in_out(0.0), 0.0);
		assert_eq!(ease_cubic_in_out(0.5), 0.5);
		assert_eq!(ease_cubic_in_out(1.0), 1.0);
		assert!(ease_cubic_in_out(0.25) < 0.25);
		assert!(ease_cubic_in_out(0.75) > 0.75);
	}

	#[test]
	fn zoom_into_child_ends_on_its_span_with_hole() {
		let mut s = state();
		let photos = s.layout.find("photos").unwrap();
		let node = s.node(photos).unwrap().clone();
		s.zoom_to(photos);
		assert!(s.is_animating());
		run_to_end(&mut s);
		assert_eq!(s.x.domain, [node.x, node.x + node.dx]);
		assert_eq!(s.y.domain, [node.y, 1.0]);
		assert_eq!(s.y.range, [20.0, 250.0]);

		// The zoomed node now spans the full circle from the hole outwards.
		let arc = s.arc(photos).unwrap();
		assert_eq!(arc.start_angle, 0.0);
		assert!((arc.end_angle - TAU).abs() < 1e-9);
		assert!((arc.inner_radius - 20.0).abs() < 1e-9);
	}

	#[test]
	fn zoom_back_to_root_closes_the_hole() {
		let mut s = state();
		s.zoom_to(s.layout.find("photos").unwrap());
		run_to_end(&mut s);
		s.zoom_to(Layout::ROOT);
		run_to_end(&mut s);
		assert_eq!(s.x.domain, [0.0, 1.0]);
		assert_eq!(s.y.domain, [0.0, 1.0]);
		assert_eq!(s.y.range, [0.0, 250.0]);
	}

	#[test]
	fn transition_takes_configured_duration() {
		let mut s = state();
		s.zoom_to(1);
		s.tick(0.5);
		assert!(s.is_animating());
		s.tick(0.25);
		assert!(!s.is_animating());
	}

	#[test]
	fn arcs_stay_clamped_during_transition() {
		let mut s = state();
		for target in [1, 2, 4, Layout::ROOT, 3] {
			s.zoom_to(target);
			while s.is_animating() {
				s.tick(0.05);
				for (_, _, arc) in s.arcs() {
					assert!((0.0..=TAU).contains(&arc.start_angle));
					assert!((0.0..=TAU).contains(&arc.end_angle));
					assert!(arc.inner_radius >= 0.0);
					assert!(arc.outer_radius >= 0.0);
				}
			}
		}
	}

	#[test]
	fn new_click_replaces_running_transition() {
		let mut s = state();
		let photos = s.layout.find("photos").unwrap();
		s.zoom_to(photos);
		s.tick(0.3);
		let mid = s.x.domain;
		s.zoom_to(Layout::ROOT);
		assert_eq!(s.transition.as_ref().unwrap().target, Layout::ROOT);
		// Restarts from where the previous zoom left the scales.
		assert_eq!(s.x.domain, mid);
		run_to_end(&mut s);
		assert_eq!(s.x.domain, [0.0, 1.0]);
	}

	#[test]
	fn zero_duration_jumps_to_target() {
		let mut s = state();
		s.config.duration = 0.0;
		let notes = s.layout.find("notes.txt").unwrap();
		s.zoom_to(notes);
		assert!(!s.is_animating());
		assert_eq!(s.x.domain, [0.5, 1.0]);
	}

	#[test]
	fn hover_then_leave_restores_placeholder() {
		let mut s = state();
		let a = s.layout.find("a.png").unwrap();
		assert!(s.set_hover(Some(a)));
		assert_eq!(s.label().text, "a.png");
		assert_eq!(s.label().value, Some(10.0));
		assert!(!s.set_hover(Some(a)));
		assert!(s.set_hover(None));
		assert_eq!(s.label().text, "...");
		assert_eq!(s.label().value, None);
	}

	#[test]
	fn hit_testing_finds_deepest_arc() {
		let s = state();
		let (cx, cy) = s.center();
		// Straight up, in the outermost ring: first leaf of "photos".
		assert_eq!(s.node_at_position(cx + 1.0, cy - 240.0), s.layout.find("a.png"));
		// Middle ring, same direction.
		assert_eq!(s.node_at_position(cx + 1.0, cy - 180.0), s.layout.find("photos"));
		// Centre disk.
		assert_eq!(s.node_at_position(cx, cy - 5.0), Some(Layout::ROOT));
		// Outside the chart.
		assert_eq!(s.node_at_position(cx, cy - 260.0), None);
		// Lower half, middle ring: the "notes.txt" leaf.
		assert_eq!(s.node_at_position(cx - 1.0, cy + 180.0), s.layout.find("notes.txt"));
	}

	#[test]
	fn label_follows_arcs_that_move_under_the_pointer() {
		let mut s = state();
		let (cx, cy) = s.center();
		let photos = s.layout.find("photos").unwrap();
		s.pointer_moved(cx + 1.0, cy - 180.0);
		assert_eq!(s.take_label_change().unwrap().text, "photos");
		assert_eq!(s.take_label_change(), None);

		s.zoom_to(photos);
		run_to_end(&mut s);
		// The zoomed node shrank to the inner ring; its first leaf is now here.
		assert_eq!(s.hover, s.layout.find("a.png"));
		assert_eq!(s.take_label_change().unwrap().text, "a.png");

		s.pointer_left();
		assert_eq!(s.take_label_change().unwrap().text, "...");
		s.zoom_to(Layout::ROOT);
		run_to_end(&mut s);
		assert_eq!(s.hover, None);
		assert_eq!(s.take_label_change(), None);
	}

	#[test]
	fn redraws_only_after_changes() {
		let mut s = state();
		assert!(s.take_redraw());
		assert!(!s.take_redraw());
		s.tick(0.016);
		assert!(!s.take_redraw());

		s.zoom_to(1);
		assert!(s.take_redraw());
		s.tick(0.016);
		assert!(s.take_redraw());
		run_to_end(&mut s);
		assert!(s.take_redraw());
		s.tick(0.016);
		assert!(!s.take_redraw());
	}
}
