use log::{debug, info};
use serde_json::Value;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use super::delta::{Delta, tree_from_delta};
use crate::components::sunburst::TreeNode;

/// Data may live on another origin, as with a plain XHR.
const REQUEST_MODE: RequestMode = RequestMode::Cors;

#[derive(Debug, Error)]
pub enum LoadError {
	#[error("no browser window")]
	NoWindow,
	#[error("request failed: {0}")]
	Fetch(String),
	#[error("server answered {status} for {url}")]
	Status { url: String, status: u16 },
	#[error("invalid JSON: {0}")]
	Parse(#[from] serde_json::Error),
}

impl From<JsValue> for LoadError {
	fn from(value: JsValue) -> Self {
		let message = value
			.as_string()
			.or_else(|| {
				value
					.dyn_ref::<js_sys::Error>()
					.map(|e| String::from(e.message()))
			})
			.unwrap_or_else(|| format!("{value:?}"));
		LoadError::Fetch(message)
	}
}

fn looks_like_tree(map: &serde_json::Map<String, Value>) -> bool {
	["name", "children", "size"].iter().any(|k| map.contains_key(*k))
}

/// Parses either a nested tree document or a flat file listing.
pub fn parse_document(text: &str) -> Result<TreeNode, LoadError> {
	let value: Value = serde_json::from_str(text)?;
	let is_listing = matches!(&value, Value::Object(map) if !looks_like_tree(map));
	if is_listing {
		let delta: Delta = serde_json::from_value(value)?;
		debug!("building tree from listing of {} entries", delta.len());
		return Ok(tree_from_delta(&delta));
	}
	Ok(serde_json::from_value(value)?)
}

/// GETs `url` and parses the body with [`parse_document`].
pub async fn load_tree(url: &str) -> Result<TreeNode, LoadError> {
	let window = web_sys::window().ok_or(LoadError::NoWindow)?;

	let opts = RequestInit::new();
	opts.set_method("GET");
	opts.set_mode(REQUEST_MODE);
	let request = Request::new_with_str_and_init(url, &opts)?;
	request.headers().set("Accept", "application/json")?;

	let response: Response = JsFuture::from(window.fetch_with_request(&request))
		.await?
		.dyn_into()?;
	if !response.ok() {
		return Err(LoadError::Status {
			url: url.to_string(),
			status: response.status(),
		});
	}
	let text = JsFuture::from(response.text()?)
		.await?
		.as_string()
		.ok_or_else(|| LoadError::Fetch("response body is not text".into()))?;
	info!("fetched {} ({} bytes)", url, text.len());
	parse_document(&text)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_tree_documents() {
		let tree = parse_document(
			r#"{"name":"root","children":[{"name":"a","size":10},{"name":"b","size":30}]}"#,
		)
		.unwrap();
		assert_eq!(tree.name, "root");
		assert_eq!(tree.children.unwrap().len(), 2);
	}

	#[test]
	fn parses_file_listings() {
		let tree = parse_document(
			r#"{"/a.txt": {"path": "/A.txt", "bytes": 3, "is_dir": false}}"#,
		)
		.unwrap();
		assert_eq!(tree.name, "Dropbox");
		assert_eq!(tree.children.unwrap()[0].size, Some(3.0));
	}

	#[test]
	fn requests_allow_cross_origin_data() {
		assert_eq!(REQUEST_MODE, RequestMode::Cors);
	}

	#[test]
	fn malformed_json_is_a_parse_error() {
		let err = parse_document("{\"name\": ").unwrap_err();
		assert!(matches!(err, LoadError::Parse(_)));
		assert!(err.to_string().starts_with("invalid JSON"));
	}

	#[test]
	fn wrong_shape_is_a_parse_error() {
		assert!(matches!(
			parse_document(r#"{"name": 5}"#),
			Err(LoadError::Parse(_))
		));
		assert!(matches!(parse_document("[1, 2]"), Err(LoadError::Parse(_))));
	}
}
