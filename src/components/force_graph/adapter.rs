//! Turns the backend's flat export into the renderer's [`GraphData`].

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use super::entity::EntityType;
use super::types::{GraphData, GraphLink, GraphNode};
use crate::api::{GraphEdgeRecord, GraphExport, GraphNodeRecord};

/// Nodes and edges surviving a type filter, still in wire form.
#[derive(Debug, Default)]
pub struct FilteredGraph<'a> {
	pub nodes: Vec<&'a GraphNodeRecord>,
	pub edges: Vec<&'a GraphEdgeRecord>,
}

/// Keeps nodes of `filter` plus their direct neighbors, and the edges between them.
///
/// Edges are treated as undirected. Edges with an unknown endpoint never
/// survive, with or without a filter. Duplicate node ids keep the first record.
pub fn filter_by_type(export: &GraphExport, filter: Option<EntityType>) -> FilteredGraph<'_> {
	let mut seen = HashSet::new();
	let mut nodes = Vec::with_capacity(export.nodes.len());
	for node in &export.nodes {
		if seen.insert(node.id.as_str()) {
			nodes.push(node);
		} else {
			warn!("duplicate graph node id {:?}, keeping the first", node.id);
		}
	}

	let known: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
	let edges: Vec<&GraphEdgeRecord> = export
		.edges
		.iter()
		.filter(|e| known.contains(e.source.as_str()) && known.contains(e.target.as_str()))
		.collect();
	let dropped = export.edges.len() - edges.len();
	if dropped > 0 {
		warn!("dropped {dropped} graph edges referencing unknown nodes");
	}

	let Some(filter) = filter else {
		return FilteredGraph { nodes, edges };
	};

	let matching: HashSet<&str> = nodes
		.iter()
		.filter(|n| EntityType::from_raw(&n.kind) == filter)
		.map(|n| n.id.as_str())
		.collect();
	let mut visible = matching.clone();
	for e in &edges {
		if matching.contains(e.source.as_str()) {
			visible.insert(e.target.as_str());
		}
		if matching.contains(e.target.as_str()) {
			visible.insert(e.source.as_str());
		}
	}

	FilteredGraph {
		nodes: nodes
			.into_iter()
			.filter(|n| visible.contains(n.id.as_str()))
			.collect(),
		edges: edges
			.into_iter()
			.filter(|e| visible.contains(e.source.as_str()) && visible.contains(e.target.as_str()))
			.collect(),
	}
}

/// Filters, colors and sizes the export for rendering.
///
/// `size` becomes the node's degree among the visible edges, at least 1; the
/// server-supplied size is ignored.
pub fn adapt(export: &GraphExport, filter: Option<EntityType>) -> GraphData {
	let filtered = filter_by_type(export, filter);
	let index: HashMap<&str, usize> = filtered
		.nodes
		.iter()
		.enumerate()
		.map(|(i, n)| (n.id.as_str(), i))
		.collect();

	let mut degree = vec![0usize; filtered.nodes.len()];
	let links: Vec<GraphLink> = filtered
		.edges
		.iter()
		.filter_map(|e| {
			let (source, target) = (*index.get(e.source.as_str())?, *index.get(e.target.as_str())?);
			degree[source] += 1;
			degree[target] += 1;
			Some(GraphLink {
				source,
				target,
				relationship: if e.relationship.is_empty() {
					"connected".into()
				} else {
					e.relationship.clone()
				},
				weight: if e.weight > 0.0 { e.weight } else { 1.0 },
			})
		})
		.collect();

	let nodes = filtered
		.nodes
		.iter()
		.zip(&degree)
		.map(|(n, &deg)| {
			let entity = EntityType::from_raw(&n.kind);
			GraphNode {
				id: n.id.clone(),
				entity,
				label: n.label.clone(),
				description: n.description.clone().filter(|d| !d.is_empty()),
				color: entity.style().bg,
				size: deg.max(1),
			}
		})
		.collect();

	let data = GraphData { nodes, links };
	debug!(
		"adapted graph: {} nodes, {} links (filter {:?})",
		data.nodes.len(),
		data.links.len(),
		filter
	);
	data
}

/// Entity types present in the export with their node counts, most common first.
///
/// Ties keep the order in which the types first appear.
pub fn type_counts(export: &GraphExport) -> Vec<(EntityType, usize)> {
	let mut counts: Vec<(EntityType, usize)> = Vec::new();
	for node in &export.nodes {
		let ty = EntityType::from_raw(&node.kind);
		match counts.iter_mut().find(|(t, _)| *t == ty) {
			Some((_, count)) => *count += 1,
			None => counts.push((ty, 1)),
		}
	}
	counts.sort_by(|a, b| b.1.cmp(&a.1));
	counts
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(id: &str, kind: &str) -> GraphNodeRecord {
		GraphNodeRecord {
			id: id.into(),
			kind: kind.into(),
			label: id.to_uppercase(),
			description: None,
			size: 7.0,
		}
	}

	fn edge(source: &str, target: &str) -> GraphEdgeRecord {
		GraphEdgeRecord {
			source: source.into(),
			target: target.into(),
			relationship: "appears_with".into(),
			weight: 1.0,
		}
	}

	fn sample() -> GraphExport {
		GraphExport {
			nodes: vec![
				node("water", "symbol"),
				node("mother", "character"),
				node("fear", "emotion"),
				node("house", "location"),
				node("lonely", "symbol"),
			],
			edges: vec![
				edge("water", "mother"),
				edge("fear", "water"),
				edge("mother", "house"),
			],
			..Default::default()
		}
	}

	fn ids(data: &GraphData) -> Vec<&str> {
		data.nodes.iter().map(|n| n.id.as_str()).collect()
	}

	fn as_export(data: &GraphData, source: &GraphExport) -> GraphExport {
		GraphExport {
			nodes: data
				.nodes
				.iter()
				.map(|n| source.nodes.iter().find(|r| r.id == n.id).unwrap().clone())
				.collect(),
			edges: data
				.links
				.iter()
				.map(|l| edge(&data.nodes[l.source].id, &data.nodes[l.target].id))
				.collect(),
			..Default::default()
		}
	}

	#[test]
	fn filter_keeps_one_hop_neighborhood() {
		let data = adapt(&sample(), Some(EntityType::Symbol));
		assert_eq!(ids(&data), ["water", "mother", "fear", "lonely"]);
		// mother-house is dropped with house
		assert_eq!(data.links.len(), 2);
		for link in &data.links {
			assert!(link.source < data.nodes.len() && link.target < data.nodes.len());
		}
	}

	#[test]
	fn filter_is_idempotent() {
		let export = sample();
		for ty in EntityType::ALL {
			let once = adapt(&export, Some(ty));
			let twice = adapt(&as_export(&once, &export), Some(ty));
			assert_eq!(ids(&once), ids(&twice), "{ty:?}");
			assert_eq!(once.links.len(), twice.links.len(), "{ty:?}");
		}
	}

	#[test]
	fn filter_treats_edges_as_undirected() {
		let forward = GraphExport {
			nodes: vec![node("a", "theme"), node("b", "object")],
			edges: vec![edge("a", "b")],
			..Default::default()
		};
		let backward = GraphExport {
			edges: vec![edge("b", "a")],
			..forward.clone()
		};
		assert_eq!(ids(&adapt(&forward, Some(EntityType::Theme))), ["a", "b"]);
		assert_eq!(ids(&adapt(&backward, Some(EntityType::Theme))), ["a", "b"]);
	}

	#[test]
	fn degree_replaces_server_size() {
		let mut export = GraphExport {
			nodes: vec![node("hub", "symbol"), node("alone", "theme")],
			..Default::default()
		};
		for i in 0..6 {
			let id = format!("leaf{i}");
			export.nodes.push(node(&id, "character"));
			export.edges.push(edge("hub", &id));
		}
		let data = adapt(&export, None);
		assert_eq!(data.node("hub").unwrap().size, 6);
		assert_eq!(data.node("alone").unwrap().size, 1);
		assert_eq!(data.node("leaf3").unwrap().size, 1);
	}

	#[test]
	fn degree_counts_visible_edges_only() {
		let data = adapt(&sample(), Some(EntityType::Symbol));
		// mother keeps only its edge to water
		assert_eq!(data.node("mother").unwrap().size, 1);
		assert_eq!(data.node("water").unwrap().size, 2);
	}

	#[test]
	fn two_node_round_trip() {
		let export: GraphExport = serde_json::from_str(
			r#"{"nodes":[{"id":"a","type":"symbol","label":"Water","size":1},
			{"id":"b","type":"character","label":"Mother","size":1}],
			"edges":[{"source":"a","target":"b","relationship":"appears_with","weight":1}]}"#,
		)
		.unwrap();

		let symbols = adapt(&export, Some(EntityType::from_raw("symbol")));
		assert_eq!(ids(&symbols), ["a", "b"]);
		assert_eq!(symbols.links.len(), 1);
		assert_eq!(symbols.links[0].relationship, "appears_with");

		let emotions = adapt(&export, Some(EntityType::from_raw("emotion")));
		assert!(emotions.nodes.is_empty());
		assert!(emotions.links.is_empty());
	}

	#[test]
	fn orphan_edges_and_duplicate_ids_are_tolerated() {
		let export = GraphExport {
			nodes: vec![node("a", "symbol"), node("a", "theme"), node("b", "symbol")],
			edges: vec![edge("a", "ghost"), edge("a", "b")],
			..Default::default()
		};
		let data = adapt(&export, None);
		assert_eq!(ids(&data), ["a", "b"]);
		assert_eq!(data.nodes[0].entity, EntityType::Symbol);
		assert_eq!(data.links.len(), 1);
		assert_eq!(data.nodes[0].size, 1);
	}

	#[test]
	fn colors_follow_type_and_blank_relationships_read_connected() {
		let export = GraphExport {
			nodes: vec![node("a", "Personal_Meaning"), node("b", "mystery")],
			edges: vec![GraphEdgeRecord {
				relationship: String::new(),
				..edge("a", "b")
			}],
			..Default::default()
		};
		let data = adapt(&export, None);
		assert_eq!(data.nodes[0].color, "#f87171");
		assert_eq!(data.nodes[1].color, "#9ca3af");
		assert_eq!(data.links[0].relationship, "connected");
	}

	#[test]
	fn type_counts_sorted_by_frequency() {
		let counts = type_counts(&sample());
		assert_eq!(counts[0], (EntityType::Symbol, 2));
		// ties keep first-appearance order
		assert_eq!(
			counts[1..].iter().map(|(t, _)| *t).collect::<Vec<_>>(),
			[EntityType::Character, EntityType::Emotion, EntityType::Location]
		);
	}
}
