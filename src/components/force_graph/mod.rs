pub mod adapter;
pub mod camera;
mod component;
pub mod connections;
pub mod entity;
pub mod interaction;
pub mod layout;
pub mod painter;
mod render;
pub mod scene;
mod types;

pub use component::ForceGraphCanvas;
pub use entity::{EntityStyle, EntityType};
pub use interaction::{CameraCommand, Interaction};
pub use types::{GraphData, GraphLink, GraphNode};
