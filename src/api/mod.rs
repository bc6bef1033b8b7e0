//! REST client for the Dream Journal graph endpoints.

mod client;
mod error;
mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use types::{
	GraphEdgeRecord, GraphExport, GraphNodeRecord, GraphStats, GraphStatus, IndexResponse,
};
