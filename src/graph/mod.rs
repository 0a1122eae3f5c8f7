//! Project graph engine: derives the project, page and story hierarchy of a
//! project snapshot as a positioned, styled node and edge list.
//!
//! Everything here is pure and synchronous. The only state that outlives a
//! build is the [`VisibilityStore`], owned by the caller.

mod builder;
mod edges;
mod layout;
mod snapshot;
mod types;
mod visibility;

pub use builder::{build, build_with, edge_id, page_node_id, project_node_id, story_node_id};
pub use edges::{
	EdgeKind, EdgeStyle, NEUTRAL_COLOR, STRUCTURAL_COLOR, SUCCESS_COLOR, WARNING_COLOR, classify,
};
pub use layout::{LayoutConfig, row_centers};
pub use snapshot::{SnapshotError, parse_project, parse_projects};
pub use types::{
	GraphEdge, GraphNode, GraphStats, NodeData, NodeTier, Page, PageSummary, Position, Priority,
	Project, ProjectGraph, ProjectSummary, Size, UserStory, UserStoryStatus,
};
pub use visibility::VisibilityStore;
