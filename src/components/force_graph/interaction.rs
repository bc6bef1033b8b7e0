//! Selection, hover, filter and label toggles driven by user input.

use super::entity::EntityType;
use super::types::GraphData;

pub const ZOOM_STEP: f64 = 1.5;
pub const FOCUS_ZOOM: f64 = 2.5;
pub const FOCUS_DURATION_MS: f64 = 500.0;
pub const ZOOM_DURATION_MS: f64 = 300.0;
pub const FIT_DURATION_MS: f64 = 400.0;
pub const FIT_PADDING: f64 = 60.0;

/// Camera moves requested from outside the canvas.
#[derive(Clone, Debug, PartialEq)]
pub enum CameraCommand {
	/// Center on a node and zoom to [`FOCUS_ZOOM`].
	Focus { node_id: String },
	/// Multiply the zoom level.
	ZoomBy(f64),
	/// Fit every visible node with the given padding in pixels.
	Fit { padding: f64 },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Interaction {
	pub selected: Option<String>,
	pub hovered: Option<String>,
	pub filter: Option<EntityType>,
	pub show_labels: bool,
}

impl Interaction {
	/// Toggles selection of `node_id`, asking the camera to focus on a new selection.
	pub fn click_node(&mut self, node_id: &str) -> Option<CameraCommand> {
		if self.selected.as_deref() == Some(node_id) {
			self.selected = None;
			None
		} else {
			self.selected = Some(node_id.to_owned());
			Some(CameraCommand::Focus {
				node_id: node_id.to_owned(),
			})
		}
	}

	pub fn click_background(&mut self) {
		self.selected = None;
	}

	/// Returns whether the hovered node changed.
	pub fn hover(&mut self, node_id: Option<&str>) -> bool {
		if self.hovered.as_deref() == node_id {
			return false;
		}
		self.hovered = node_id.map(str::to_owned);
		true
	}

	/// Legend chip click: set the filter, or clear it when already active.
	pub fn toggle_filter(&mut self, ty: EntityType) {
		self.filter = if self.filter == Some(ty) { None } else { Some(ty) };
	}

	pub fn clear_filter(&mut self) {
		self.filter = None;
	}

	pub fn toggle_labels(&mut self) {
		self.show_labels = !self.show_labels;
	}

	/// Forgets selection and hover pointing at nodes that are no longer visible.
	pub fn retain_visible(&mut self, data: &GraphData) {
		if let Some(id) = &self.selected {
			if data.index_of(id).is_none() {
				self.selected = None;
			}
		}
		if let Some(id) = &self.hovered {
			if data.index_of(id).is_none() {
				self.hovered = None;
			}
		}
	}

	pub fn is_selected(&self, node_id: &str) -> bool {
		self.selected.as_deref() == Some(node_id)
	}

	pub fn is_hovered(&self, node_id: &str) -> bool {
		self.hovered.as_deref() == Some(node_id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::GraphExport;
	use crate::components::force_graph::adapter::adapt;

	#[test]
	fn clicking_toggles_selection() {
		let mut ui = Interaction::default();
		assert_eq!(
			ui.click_node("x"),
			Some(CameraCommand::Focus {
				node_id: "x".into()
			})
		);
		assert_eq!(ui.selected.as_deref(), Some("x"));

		assert_eq!(ui.click_node("x"), None);
		assert_eq!(ui.selected, None);
	}

	#[test]
	fn clicking_another_node_moves_selection() {
		let mut ui = Interaction::default();
		ui.click_node("x");
		assert!(ui.click_node("y").is_some());
		assert!(ui.is_selected("y"));
		assert!(!ui.is_selected("x"));
	}

	#[test]
	fn background_click_always_clears() {
		let mut ui = Interaction::default();
		ui.click_background();
		assert_eq!(ui.selected, None);
		ui.click_node("x");
		ui.click_background();
		assert_eq!(ui.selected, None);
	}

	#[test]
	fn hover_does_not_touch_selection() {
		let mut ui = Interaction::default();
		ui.click_node("x");
		assert!(ui.hover(Some("y")));
		assert!(!ui.hover(Some("y")));
		assert!(ui.is_hovered("y"));
		assert!(ui.is_selected("x"));
		assert!(ui.hover(None));
		assert_eq!(ui.hovered, None);
	}

	#[test]
	fn legend_chip_toggles_filter() {
		let mut ui = Interaction::default();
		ui.toggle_filter(EntityType::Symbol);
		assert_eq!(ui.filter, Some(EntityType::Symbol));
		ui.toggle_filter(EntityType::Theme);
		assert_eq!(ui.filter, Some(EntityType::Theme));
		ui.toggle_filter(EntityType::Theme);
		assert_eq!(ui.filter, None);
	}

	#[test]
	fn labels_toggle() {
		let mut ui = Interaction::default();
		ui.toggle_labels();
		assert!(ui.show_labels);
		ui.toggle_labels();
		assert!(!ui.show_labels);
	}

	#[test]
	fn filter_change_drops_hidden_selection() {
		let export: GraphExport = serde_json::from_str(
			r#"{"nodes":[{"id":"a","type":"symbol","label":"Water","size":1},
			{"id":"b","type":"theme","label":"Flight","size":1}],"edges":[]}"#,
		)
		.unwrap();
		let mut ui = Interaction::default();
		ui.click_node("b");
		ui.hover(Some("b"));
		ui.toggle_filter(EntityType::Symbol);
		ui.retain_visible(&adapt(&export, ui.filter));
		assert_eq!(ui.selected, None);
		assert_eq!(ui.hovered, None);
	}
}
