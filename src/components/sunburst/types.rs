use serde::{Deserialize, Serialize};

/// A node of the input hierarchy, as read from JSON.
///
/// A node without `children` is a leaf and is weighted by its `size`.
/// Internal nodes are weighted by the sum of their descendants; any `size`
/// they carry is ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
	#[serde(default)]
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub size: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
	#[cfg(test)]
	pub fn leaf(name: impl Into<String>, size: f64) -> Self {
		Self {
			name: name.into(),
			size: Some(size),
			children: None,
		}
	}

	pub fn branch(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
		Self {
			name: name.into(),
			size: None,
			children: Some(children),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_nested_json_and_ignores_unknown_fields() {
		let json = r#"{
			"name": "root",
			"_id": "dropbox",
			"children": [
				{"name": "a", "size": 10, "icon": "page_white"},
				{"name": "dir", "children": []}
			]
		}"#;
		let root: TreeNode = serde_json::from_str(json).unwrap();
		let children = root.children.as_ref().unwrap();
		assert_eq!(root.name, "root");
		assert_eq!(children[0], TreeNode::leaf("a", 10.0));
		assert!(children[1].children.is_some());
		assert_eq!(children[1].children.as_ref().unwrap().len(), 0);
	}

	#[test]
	fn missing_name_defaults_to_empty() {
		let node: TreeNode = serde_json::from_str(r#"{"size": 3}"#).unwrap();
		assert_eq!(node.name, "");
		assert!(node.children.is_none());
	}
}
