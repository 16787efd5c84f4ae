use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{error, info};

use crate::components::sunburst::{HoverLabel, SunburstCanvas, TreeNode};
use crate::data::{load_tree, readable_size};

const DEFAULT_DATA_URL: &str = "tree.json";

/// Data URL from the `?data=` query parameter, if any.
fn data_url() -> String {
	web_sys::window()
		.and_then(|w| w.location().search().ok())
		.and_then(|search| web_sys::UrlSearchParams::new_with_str(&search).ok())
		.and_then(|params| params.get("data"))
		.filter(|url| !url.is_empty())
		.unwrap_or_else(|| DEFAULT_DATA_URL.to_string())
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let (tree, set_tree) = signal(None::<TreeNode>);
	let (load_error, set_load_error) = signal(None::<String>);
	let (label, set_label) = signal(String::from("..."));
	let (detail, set_detail) = signal(String::new());

	let url = data_url();
	spawn_local(async move {
		match load_tree(&url).await {
			Ok(root) => {
				info!("loaded tree {:?} from {}", root.name, url);
				set_tree.set(Some(root));
			}
			Err(err) => {
				error!("could not load {}: {}", url, err);
				set_load_error.set(Some(err.to_string()));
			}
		}
	});

	let on_label = Callback::new(move |hover: HoverLabel| {
		set_label.set(hover.text);
		set_detail.set(hover.value.map(readable_size).unwrap_or_default());
	});

	view! {
		<div class="sunburst-page">
			<h1>"Sunburst"</h1>
			<p class="subtitle">"Click a segment to zoom in, click the centre to zoom out."</p>
			<div id="chart">
				<SunburstCanvas data=tree on_label=on_label />
			</div>
			<p id="path">{label}</p>
			<p class="size">{detail}</p>
			<Show when=move || load_error.get().is_some()>
				<p class="error">"Could not load data: " {move || load_error.get().unwrap_or_default()}</p>
			</Show>
		</div>
	}
}
