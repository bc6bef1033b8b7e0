use super::entity::EntityType;

/// A node as the renderer sees it, after adapting and filtering.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: String,
	pub entity: EntityType,
	pub label: String,
	pub description: Option<String>,
	pub color: &'static str,
	/// Degree in the visible subgraph, at least 1.
	pub size: usize,
}

impl GraphNode {
	/// Text painted under the node; the id stands in for an empty label.
	pub fn display_label(&self) -> &str {
		if self.label.is_empty() {
			&self.id
		} else {
			&self.label
		}
	}
}

/// An edge between two visible nodes, by index into [`GraphData::nodes`].
#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	pub source: usize,
	pub target: usize,
	pub relationship: String,
	pub weight: f64,
}

impl GraphLink {
	pub fn touches(&self, idx: usize) -> bool {
		self.source == idx || self.target == idx
	}

	/// The endpoint opposite `idx`, if the link touches it.
	pub fn other(&self, idx: usize) -> Option<usize> {
		if self.source == idx {
			Some(self.target)
		} else if self.target == idx {
			Some(self.source)
		} else {
			None
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

impl GraphData {
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.nodes.iter().position(|n| n.id == id)
	}

	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.id == id)
	}
}
