use leptos::prelude::*;
use sunburst_canvas::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(App)
}
