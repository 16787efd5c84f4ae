//! Input documents: fetching, parsing and converting to a [`TreeNode`].
//!
//! [`TreeNode`]: crate::components::sunburst::TreeNode

pub mod delta;
pub mod load;
pub mod size;

pub use load::load_tree;
pub use size::readable_size;
