use super::types::{GraphData, GraphNode};

/// Most neighbors listed in the details panel.
pub const MAX_LISTED_CONNECTIONS: usize = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct Connection {
	pub node: GraphNode,
	pub relationship: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConnectionSummary {
	/// Every visible link touching the node.
	pub total: usize,
	/// The first [`MAX_LISTED_CONNECTIONS`] neighbors in link order.
	pub listed: Vec<Connection>,
}

/// Neighbors of `node_id` among the visible links, in edge-list order.
pub fn summarize(data: &GraphData, node_id: &str) -> ConnectionSummary {
	let Some(idx) = data.index_of(node_id) else {
		return ConnectionSummary::default();
	};
	let mut summary = ConnectionSummary::default();
	for link in &data.links {
		let Some(other) = link.other(idx) else {
			continue;
		};
		summary.total += 1;
		if summary.listed.len() < MAX_LISTED_CONNECTIONS {
			summary.listed.push(Connection {
				node: data.nodes[other].clone(),
				relationship: link.relationship.clone(),
			});
		}
	}
	summary
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::entity::EntityType;
	use crate::components::force_graph::types::GraphLink;

	fn graph_with_hub(leaves: usize) -> GraphData {
		let mut nodes = vec![GraphNode {
			id: "hub".into(),
			entity: EntityType::Symbol,
			label: "Hub".into(),
			description: None,
			color: EntityType::Symbol.style().bg,
			size: leaves,
		}];
		let mut links = Vec::new();
		for i in 0..leaves {
			nodes.push(GraphNode {
				id: format!("n{i}"),
				entity: EntityType::Character,
				label: format!("Node {i}"),
				description: None,
				color: EntityType::Character.style().bg,
				size: 1,
			});
			// alternate direction, both count
			let (source, target) = if i % 2 == 0 { (0, i + 1) } else { (i + 1, 0) };
			links.push(GraphLink {
				source,
				target,
				relationship: format!("rel{i}"),
				weight: 1.0,
			});
		}
		GraphData { nodes, links }
	}

	#[test]
	fn caps_list_but_not_total() {
		let summary = summarize(&graph_with_hub(8), "hub");
		assert_eq!(summary.total, 8);
		assert_eq!(summary.listed.len(), 5);
	}

	#[test]
	fn lists_in_edge_order_with_other_endpoint() {
		let summary = summarize(&graph_with_hub(3), "hub");
		let listed: Vec<_> = summary
			.listed
			.iter()
			.map(|c| (c.node.id.as_str(), c.relationship.as_str()))
			.collect();
		assert_eq!(listed, [("n0", "rel0"), ("n1", "rel1"), ("n2", "rel2")]);
	}

	#[test]
	fn leaf_sees_only_the_hub() {
		let summary = summarize(&graph_with_hub(4), "n1");
		assert_eq!(summary.total, 1);
		assert_eq!(summary.listed[0].node.id, "hub");
	}

	#[test]
	fn unknown_node_has_no_connections() {
		assert_eq!(
			summarize(&graph_with_hub(2), "nope"),
			ConnectionSummary::default()
		);
	}
}
