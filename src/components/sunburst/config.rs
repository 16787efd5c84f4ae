/// Fixed chart settings.
#[derive(Clone, Debug, PartialEq)]
pub struct SunburstConfig {
	pub width: f64,
	pub height: f64,
	/// Zoom transition length in seconds.
	pub duration: f64,
	/// Radius of the hole left in the middle when zoomed below the root.
	pub hole_radius: f64,
	/// Vertical offset of the chart centre from the middle of the canvas.
	pub center_offset_y: f64,
	pub branch_color: String,
	pub leaf_color: String,
	pub background: String,
	pub placeholder: String,
}

impl Default for SunburstConfig {
	fn default() -> Self {
		Self {
			width: 500.0,
			height: 500.0,
			duration: 0.75,
			hole_radius: 20.0,
			center_offset_y: 10.0,
			branch_color: "#00A2FF".into(),
			leaf_color: "#BFE5FF".into(),
			background: "#ffffff".into(),
			placeholder: "...".into(),
		}
	}
}

impl SunburstConfig {
	pub fn radius(&self) -> f64 {
		self.width.min(self.height) / 2.0
	}
}
