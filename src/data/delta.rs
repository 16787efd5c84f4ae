//! Builds a tree out of a flat file listing.
//!
//! Listings map a lower-cased path (`/public/myfolder`) to the entry's
//! metadata, or to `null` for deleted entries. Folders that only appear as a
//! prefix of another path are created on demand.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::components::sunburst::TreeNode;

pub const ROOT_NAME: &str = "Dropbox";

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct DeltaEntry {
	/// Display path, with original casing.
	pub path: String,
	#[serde(default)]
	pub bytes: u64,
	#[serde(default)]
	pub is_dir: bool,
}

pub type Delta = BTreeMap<String, Option<DeltaEntry>>;

#[derive(Debug)]
struct Entry {
	key: String,
	name: Option<String>,
	size: Option<f64>,
	children: Option<Vec<Entry>>,
}

impl Entry {
	fn new(key: &str) -> Self {
		Self {
			key: key.to_string(),
			name: None,
			size: None,
			children: None,
		}
	}

	fn into_tree(self) -> TreeNode {
		TreeNode {
			name: self.name.unwrap_or(self.key),
			size: self.size,
			children: self
				.children
				.map(|c| c.into_iter().map(Entry::into_tree).collect()),
		}
	}
}

/// Nests `delta` under a single root folder.
pub fn tree_from_delta(delta: &Delta) -> TreeNode {
	let mut root = Vec::new();

	for (path, meta) in delta {
		let Some(meta) = meta else {
			continue;
		};
		let sections: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
		let Some((last, parents)) = sections.split_last() else {
			continue;
		};

		let mut level: &mut Vec<Entry> = &mut root;
		for section in parents {
			let entries = level;
			let pos = match entries.iter().position(|e| e.key == *section) {
				Some(pos) => pos,
				None => {
					entries.push(Entry::new(section));
					entries.len() - 1
				}
			};
			let folder = &mut entries[pos];
			// A path nested below a file turns that file into a folder.
			if folder.children.is_none() {
				folder.size = None;
			}
			level = folder.children.get_or_insert_with(Vec::new);
		}

		let pos = match level.iter().position(|e| e.key == *last) {
			Some(pos) => pos,
			None => {
				level.push(Entry::new(last));
				level.len() - 1
			}
		};
		let entry = &mut level[pos];
		entry.name = Some(meta.path.clone());
		if meta.is_dir {
			entry.children.get_or_insert_with(Vec::new);
		} else if entry.children.is_none() {
			entry.size = Some(meta.bytes as f64);
		}
	}

	TreeNode::branch(ROOT_NAME, root.into_iter().map(Entry::into_tree).collect())
}
