//! Edge classification: maps what an edge connects to how it is drawn.

use super::types::UserStoryStatus;

/// Color of project to page edges.
pub const STRUCTURAL_COLOR: &str = "#6366f1";
/// Color of edges into completed stories.
pub const SUCCESS_COLOR: &str = "#10b981";
/// Color of edges into stories being worked on.
pub const WARNING_COLOR: &str = "#f59e0b";
/// Color of edges into stories that are not started or have an unknown status.
pub const NEUTRAL_COLOR: &str = "#94a3b8";

const STRUCTURAL_STROKE: f64 = 3.0;
const STRUCTURAL_MARKER: f64 = 20.0;
const STORY_STROKE: f64 = 2.0;
const STORY_MARKER: f64 = 15.0;

/// What an edge connects.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EdgeKind {
	/// Project to page.
	Structural,
	/// Page to story, keyed on the story's status.
	Status(UserStoryStatus),
}

/// Visual style of an edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeStyle {
	/// CSS color of the stroke and arrow marker.
	pub color: &'static str,
	/// Stroke width in pixels.
	pub stroke_width: f64,
	/// Arrow marker size in pixels.
	pub marker_size: f64,
	/// Drawn with a flowing dash.
	pub animated: bool,
}

impl EdgeStyle {
	const fn story(color: &'static str, animated: bool) -> Self {
		Self {
			color,
			stroke_width: STORY_STROKE,
			marker_size: STORY_MARKER,
			animated,
		}
	}
}

/// Style for an edge kind. Total over every status, known or not.
pub fn classify(kind: &EdgeKind) -> EdgeStyle {
	match kind {
		EdgeKind::Structural => EdgeStyle {
			color: STRUCTURAL_COLOR,
			stroke_width: STRUCTURAL_STROKE,
			marker_size: STRUCTURAL_MARKER,
			animated: false,
		},
		EdgeKind::Status(UserStoryStatus::Done) => EdgeStyle::story(SUCCESS_COLOR, false),
		EdgeKind::Status(UserStoryStatus::InProgress) => EdgeStyle::story(WARNING_COLOR, true),
		EdgeKind::Status(UserStoryStatus::Todo | UserStoryStatus::Other(_)) => {
			EdgeStyle::story(NEUTRAL_COLOR, false)
		}
	}
}
