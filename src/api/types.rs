//! Wire types for the `/graph` endpoints.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphStatus {
	pub total_dreams: u32,
	pub indexed_dreams: u32,
	pub pending_dreams: u32,
	pub graph_exists: bool,
	#[serde(default)]
	pub entity_count: Option<u32>,
	#[serde(default)]
	pub relationship_count: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphNodeRecord {
	pub id: String,
	#[serde(rename = "type")]
	pub kind: String,
	pub label: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(default)]
	pub size: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphEdgeRecord {
	pub source: String,
	pub target: String,
	#[serde(default)]
	pub relationship: String,
	#[serde(default = "default_weight")]
	pub weight: f64,
}

fn default_weight() -> f64 {
	1.0
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
	pub node_count: u32,
	pub edge_count: u32,
}

/// Flat node/edge export of the user's knowledge graph.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphExport {
	pub nodes: Vec<GraphNodeRecord>,
	pub edges: Vec<GraphEdgeRecord>,
	#[serde(default)]
	pub stats: GraphStats,
}

/// Response of `POST /graph/index` and `POST /graph/reindex`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexResponse {
	pub success: bool,
	pub dreams_indexed: u32,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn decodes_export_with_optional_fields_missing() {
		let json = r#"{
			"nodes": [
				{"id": "a", "type": "symbol", "label": "Water", "size": 3},
				{"id": "b", "type": "CHARACTER", "label": "Mother", "description": "Mom", "size": 1}
			],
			"edges": [
				{"source": "a", "target": "b", "relationship": "appears_with"}
			],
			"stats": {"node_count": 2, "edge_count": 1}
		}"#;
		let export: GraphExport = serde_json::from_str(json).unwrap();
		assert_eq!(export.nodes.len(), 2);
		assert_eq!(export.nodes[0].kind, "symbol");
		assert_eq!(export.nodes[0].description, None);
		assert_eq!(export.nodes[1].description.as_deref(), Some("Mom"));
		assert_eq!(export.edges[0].weight, 1.0);
		assert_eq!(export.stats.edge_count, 1);
	}

	#[test]
	fn decodes_status_with_null_counts() {
		let json = r#"{
			"total_dreams": 5,
			"indexed_dreams": 0,
			"pending_dreams": 5,
			"graph_exists": false,
			"entity_count": null,
			"relationship_count": null
		}"#;
		let status: GraphStatus = serde_json::from_str(json).unwrap();
		assert_eq!(status.pending_dreams, 5);
		assert!(!status.graph_exists);
		assert_eq!(status.entity_count, None);
	}

	#[test]
	fn export_without_stats_defaults_to_zero() {
		let export: GraphExport = serde_json::from_str(r#"{"nodes": [], "edges": []}"#).unwrap();
		assert_eq!(export.stats, GraphStats::default());
	}
}
