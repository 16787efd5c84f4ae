//! Radial partition layout.
//!
//! Every node gets a normalized angular band `[x, x + dx]` proportional to its
//! aggregate value and a radial band `[y, y + dy]` determined by its depth.
//! Both coordinates live in the unit square; the scales in
//! [`super::scale`] map them onto radians and pixels.

use super::types::TreeNode;

/// Index of a node inside a [`Layout`].
pub type NodeIdx = usize;

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutNode {
	pub name: String,
	pub depth: usize,
	/// Angular start in [0, 1].
	pub x: f64,
	/// Angular span in [0, 1].
	pub dx: f64,
	/// Radial start in [0, 1].
	pub y: f64,
	/// Radial span in [0, 1].
	pub dy: f64,
	/// Sum of leaf sizes in this subtree.
	pub value: f64,
	pub parent: Option<NodeIdx>,
	pub children: Vec<NodeIdx>,
}

impl LayoutNode {
	pub fn has_children(&self) -> bool {
		!self.children.is_empty()
	}
}

/// Flat arena of laid out nodes in pre-order; the root is always index 0.
#[derive(Clone, Debug, Default)]
pub struct Layout {
	nodes: Vec<LayoutNode>,
}

impl Layout {
	pub const ROOT: NodeIdx = 0;

	pub fn nodes(&self) -> &[LayoutNode] {
		&self.nodes
	}

	pub fn get(&self, idx: NodeIdx) -> Option<&LayoutNode> {
		self.nodes.get(idx)
	}

	pub fn root(&self) -> Option<&LayoutNode> {
		self.nodes.first()
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Number of rings, i.e. the depth of the deepest node plus one.
	pub fn rings(&self) -> usize {
		self.nodes.iter().map(|n| n.depth + 1).max().unwrap_or(0)
	}

	#[cfg(test)]
	pub fn find(&self, name: &str) -> Option<NodeIdx> {
		self.nodes.iter().position(|n| n.name == name)
	}
}

fn leaf_weight(size: Option<f64>) -> f64 {
	match size {
		Some(s) if s.is_finite() && s > 0.0 => s,
		_ => 0.0,
	}
}

/// Push `node` and its subtree in pre-order, returning the subtree value.
fn build(node: &TreeNode, depth: usize, parent: Option<NodeIdx>, out: &mut Vec<LayoutNode>) -> f64 {
	let idx = out.len();
	out.push(LayoutNode {
		name: node.name.clone(),
		depth,
		x: 0.0,
		dx: 0.0,
		y: 0.0,
		dy: 0.0,
		value: 0.0,
		parent,
		children: Vec::new(),
	});

	// An empty `children` list lays out like a leaf.
	let value = match node.children.as_deref() {
		Some(children) if !children.is_empty() => {
			let mut total = 0.0;
			for child in children {
				let child_idx = out.len();
				out[idx].children.push(child_idx);
				total += build(child, depth + 1, Some(idx), out);
			}
			total
		}
		_ => leaf_weight(node.size),
	};
	out[idx].value = value;
	value
}

/// Lay out `root` as a partition of the unit square.
pub fn compute_layout(root: &TreeNode) -> Layout {
	let mut nodes = Vec::new();
	build(root, 0, None, &mut nodes);

	let rings = nodes.iter().map(|n| n.depth + 1).max().unwrap_or(1);
	let dy = 1.0 / rings as f64;

	nodes[Layout::ROOT].dx = 1.0;

	// Pre-order guarantees a parent is positioned before its children.
	for idx in 0..nodes.len() {
		let (x, dx, value) = {
			let n = &mut nodes[idx];
			n.dy = dy;
			n.y = n.depth as f64 * dy;
			(n.x, n.dx, n.value)
		};
		let k = if value > 0.0 { dx / value } else { 0.0 };
		let mut cursor = x;
		for c in 0..nodes[idx].children.len() {
			let child = nodes[idx].children[c];
			let span = nodes[child].value * k;
			nodes[child].x = cursor;
			nodes[child].dx = span;
			cursor += span;
		}
	}

	Layout { nodes }
}
