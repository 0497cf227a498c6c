use serde::{Deserialize, Serialize};

/// One bucket of the three-level category aggregation. `children` holds the
/// next level down; leaves at l3 have none.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
	pub key: String,
	pub doc_count: u64,
	pub children: Vec<CategoryNode>,
}

/// The l1 → l2 → l3 category tree, rebuilt on every hierarchy fetch and on
/// every search response. Node order is whatever the engine returned,
/// typically count-descending.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTree {
	pub roots: Vec<CategoryNode>,
}
impl CategoryTree {
	pub fn is_empty(&self) -> bool {
		self.roots.is_empty()
	}

	pub fn level1_options(&self) -> Vec<&str> {
		self.roots.iter().map(|node| node.key.as_str()).collect()
	}

	pub fn level2_options(&self, l1: &str) -> Vec<&str> {
		self.level1(l1).map(|node| child_keys(node)).unwrap_or_default()
	}

	pub fn level3_options(&self, l1: &str, l2: &str) -> Vec<&str> {
		self.level1(l1)
			.and_then(|node| child(node, l2))
			.map(|node| child_keys(node))
			.unwrap_or_default()
	}

	fn level1(&self, key: &str) -> Option<&CategoryNode> {
		self.roots.iter().find(|node| node.key == key)
	}
}

fn child<'a>(node: &'a CategoryNode, key: &str) -> Option<&'a CategoryNode> {
	node.children.iter().find(|child| child.key == key)
}

fn child_keys(node: &CategoryNode) -> Vec<&str> {
	node.children.iter().map(|child| child.key.as_str()).collect()
}
