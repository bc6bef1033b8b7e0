//! Position engines behind the painter.

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::debug;

use super::types::GraphData;

/// Simulation ticks after a load or a drag before the layout stops moving.
pub const COOLDOWN_TICKS: u32 = 100;
const SEED_RADIUS: f64 = 100.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

/// Assigns graph-space positions to the nodes of a [`GraphData`].
///
/// `positions()[i]` belongs to `data.nodes[i]` of the last `load`.
pub trait Layout {
	/// Replaces the simulated graph. Nodes already known by id keep their position.
	fn load(&mut self, data: &GraphData);
	fn step(&mut self, dt: f32);
	fn positions(&self) -> &[Point];
	/// Fixes node `idx` at `at`; it stays pinned until the next load.
	fn pin(&mut self, idx: usize, at: Point);
	fn is_settled(&self) -> bool;
	/// Restarts the cooldown, e.g. after a drag.
	fn reheat(&mut self);
}

/// [`Layout`] backed by the `force_graph` spring/charge simulation.
pub struct ForceLayout {
	graph: ForceGraph<usize, ()>,
	handles: Vec<DefaultNodeIdx>,
	ids: Vec<String>,
	positions: Vec<Point>,
	remembered: HashMap<String, Point>,
	ticks_left: u32,
}

fn simulation() -> ForceGraph<usize, ()> {
	ForceGraph::new(SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	})
}

impl Default for ForceLayout {
	fn default() -> Self {
		Self {
			graph: simulation(),
			handles: Vec::new(),
			ids: Vec::new(),
			positions: Vec::new(),
			remembered: HashMap::new(),
			ticks_left: 0,
		}
	}
}

impl ForceLayout {
	fn refresh_positions(&mut self) {
		let positions = &mut self.positions;
		self.graph.visit_nodes(|node| {
			if let Some(p) = positions.get_mut(node.data.user_data) {
				p.x = node.x() as f64;
				p.y = node.y() as f64;
			}
		});
	}
}

impl Layout for ForceLayout {
	fn load(&mut self, data: &GraphData) {
		self.graph = simulation();
		self.handles.clear();
		for (id, p) in self.ids.drain(..).zip(self.positions.drain(..)) {
			self.remembered.insert(id, p);
		}

		let n = data.nodes.len().max(1) as f64;
		let mut kept = 0;
		for (i, node) in data.nodes.iter().enumerate() {
			let at = match self.remembered.get(&node.id) {
				Some(p) => {
					kept += 1;
					*p
				}
				None => {
					let angle = (i as f64) * 2.0 * PI / n;
					Point {
						x: SEED_RADIUS * angle.cos(),
						y: SEED_RADIUS * angle.sin(),
					}
				}
			};
			let handle = self.graph.add_node(NodeData {
				x: at.x as f32,
				y: at.y as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: i,
			});
			self.handles.push(handle);
			self.positions.push(at);
			self.ids.push(node.id.clone());
		}

		for link in &data.links {
			if let (Some(&src), Some(&tgt)) =
				(self.handles.get(link.source), self.handles.get(link.target))
			{
				if src != tgt {
					self.graph.add_edge(src, tgt, EdgeData::default());
				}
			}
		}

		self.ticks_left = COOLDOWN_TICKS;
		debug!(
			"layout loaded {} nodes ({kept} kept their position)",
			data.nodes.len()
		);
	}

	fn step(&mut self, dt: f32) {
		if self.ticks_left == 0 {
			return;
		}
		self.ticks_left -= 1;
		self.graph.update(dt);
		self.refresh_positions();
	}

	fn positions(&self) -> &[Point] {
		&self.positions
	}

	fn pin(&mut self, idx: usize, at: Point) {
		let Some(&handle) = self.handles.get(idx) else {
			return;
		};
		self.graph.visit_nodes_mut(|node| {
			if node.index() == handle {
				node.data.x = at.x as f32;
				node.data.y = at.y as f32;
				node.data.is_anchor = true;
			}
		});
		self.positions[idx] = at;
		if let Some(id) = self.ids.get(idx) {
			self.remembered.insert(id.clone(), at);
		}
	}

	fn is_settled(&self) -> bool {
		self.ticks_left == 0
	}

	fn reheat(&mut self) {
		self.ticks_left = COOLDOWN_TICKS;
	}
}
