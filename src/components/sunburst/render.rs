use log::warn;
use web_sys::{CanvasRenderingContext2d, Path2d};

use super::arc::arc_path;
use super::state::SunburstState;

pub fn render(state: &SunburstState, ctx: &CanvasRenderingContext2d) {
	let config = &state.config;
	ctx.set_fill_style_str(&config.background);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	let (cx, cy) = state.center();
	ctx.save();
	let _ = ctx.translate(cx, cy);
	ctx.set_stroke_style_str(&config.background);
	ctx.set_line_width(1.0);

	for (_, node, arc) in state.arcs() {
		if arc.is_empty() {
			continue;
		}
		let path = match Path2d::new_with_path_string(&arc_path(&arc)) {
			Ok(path) => path,
			Err(err) => {
				warn!("skipping arc for {:?}: {:?}", node.name, err);
				continue;
			}
		};
		let color = if node.has_children() {
			&config.branch_color
		} else {
			&config.leaf_color
		};
		ctx.set_fill_style_str(color);
		ctx.fill_with_path_2d(&path);
		ctx.stroke_with_path(&path);
	}
	ctx.restore();
}
