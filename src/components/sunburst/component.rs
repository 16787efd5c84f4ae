use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, error, info};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::config::SunburstConfig;
use super::partition::compute_layout;
use super::render;
use super::state::{HoverLabel, SunburstState};
use super::types::TreeNode;

type SharedState = Rc<RefCell<Option<SunburstState>>>;

// Longest step fed to the transition, so a backgrounded tab resumes smoothly.
const MAX_FRAME_SECS: f64 = 0.1;

fn canvas_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")
		.ok()
		.flatten()
		.and_then(|ctx| ctx.dyn_into().ok())
}

#[component]
pub fn SunburstCanvas(
	#[prop(into)] data: Signal<Option<TreeNode>>,
	#[prop(optional, into)] on_label: Option<Callback<HoverLabel>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init) = (state.clone(), animate.clone());

	let notify = move |label: Option<HoverLabel>| {
		if let (Some(cb), Some(label)) = (on_label, label) {
			cb.run(label);
		}
	};

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(ctx) = context_2d(&canvas) else {
			error!("canvas 2d context unavailable, chart disabled");
			return;
		};

		let config = SunburstConfig::default();
		canvas.set_width(config.width as u32);
		canvas.set_height(config.height as u32);

		// No tree (still loading, or failed): draw nothing.
		let next = data.get().map(|root| {
			let layout = compute_layout(&root);
			info!(
				"laid out {} nodes in {} rings (total value {})",
				layout.len(),
				layout.rings(),
				layout.root().map(|n| n.value).unwrap_or(0.0)
			);
			SunburstState::new(layout, config)
		});
		let placeholder = next.as_ref().map(|s| s.label().clone());
		if next.is_none() {
			ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
		}
		*state_init.borrow_mut() = next;
		notify(placeholder);

		// One frame loop per canvas; later runs only swap the state.
		if animate_init.borrow().is_some() {
			return;
		}
		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		let last = Cell::new(js_sys::Date::now());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let now = js_sys::Date::now();
			let dt = ((now - last.replace(now)) / 1000.0).clamp(0.0, MAX_FRAME_SECS);
			let mut label = None;
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				if s.is_animating() {
					s.tick(dt);
				}
				if s.take_redraw() {
					render::render(s, &ctx);
				}
				label = s.take_label_change();
			}
			notify(label);
			if let (Some(cb), Some(window)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let (Some(cb), Some(window)) = (animate_init.borrow().as_ref(), web_sys::window()) {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = canvas_position(&canvas, &ev);
		let changed = state_mm.borrow_mut().as_mut().and_then(|s| {
			s.pointer_moved(x, y);
			s.take_label_change()
		});
		notify(changed);
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let changed = state_ml
			.borrow_mut()
			.as_mut()
			.and_then(|s| {
				s.pointer_left();
				s.take_label_change()
			});
		notify(changed);
	};

	let state_click = state.clone();
	let on_click = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = canvas_position(&canvas, &ev);
		if let Some(ref mut s) = *state_click.borrow_mut() {
			match s.node_at_position(x, y) {
				Some(idx) => {
					if let Some(node) = s.node(idx) {
						debug!("clicked {:?}", node);
					}
					s.zoom_to(idx);
				}
				None => debug!("click at ({x}, {y}) hit no arc"),
			}
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="sunburst-canvas"
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			on:click=on_click
			style="display: block; cursor: pointer;"
		/>
	}
}
