//! Snapshot input model and the derived graph output model.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::edges::{EdgeKind, EdgeStyle};

/// Read-only project snapshot consumed by the graph builder.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
	/// Backend identifier.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Free-form description.
	#[serde(default)]
	pub description: String,
	/// Accent color used for the project node, any CSS color string.
	#[serde(default)]
	pub color: String,
	/// Technology tags.
	#[serde(default, alias = "technologies")]
	pub tech_stack: Vec<String>,
	/// Pages in display order.
	#[serde(default)]
	pub pages: Vec<Page>,
}

/// A page of a project and its user stories.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
	/// Backend identifier.
	pub id: String,
	/// Page title.
	pub title: String,
	/// Free-form description.
	#[serde(default)]
	pub description: String,
	/// Stories in display order. A missing collection reads as empty.
	#[serde(default)]
	pub user_stories: Vec<UserStory>,
}

/// A user story attached to a page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStory {
	/// Backend identifier, unique within its page.
	pub id: String,
	/// Story title.
	pub title: String,
	/// Optional long description.
	#[serde(default)]
	pub description: Option<String>,
	/// Workflow status.
	#[serde(default)]
	pub status: UserStoryStatus,
	/// Priority.
	#[serde(default)]
	pub priority: Priority,
}

/// Workflow status of a user story.
///
/// Parsing is total: unrecognized values are preserved in [`UserStoryStatus::Other`]
/// instead of failing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserStoryStatus {
	/// Not started.
	#[default]
	Todo,
	/// Being worked on.
	InProgress,
	/// Completed.
	Done,
	/// Any value the backend sends that this build does not know about.
	Other(String),
}

impl UserStoryStatus {
	/// Wire representation of the status.
	pub fn as_str(&self) -> &str {
		match self {
			Self::Todo => "todo",
			Self::InProgress => "in-progress",
			Self::Done => "done",
			Self::Other(raw) => raw,
		}
	}

	/// Whether the story counts as completed.
	pub fn is_done(&self) -> bool {
		matches!(self, Self::Done)
	}
}

impl From<&str> for UserStoryStatus {
	fn from(raw: &str) -> Self {
		match raw.trim().to_ascii_lowercase().as_str() {
			"todo" => Self::Todo,
			"in-progress" | "in_progress" | "inprogress" => Self::InProgress,
			"done" => Self::Done,
			_ => Self::Other(raw.to_string()),
		}
	}
}

impl From<String> for UserStoryStatus {
	fn from(raw: String) -> Self {
		Self::from(raw.as_str())
	}
}

impl From<UserStoryStatus> for String {
	fn from(status: UserStoryStatus) -> Self {
		match status {
			UserStoryStatus::Other(raw) => raw,
			known => known.as_str().to_string(),
		}
	}
}

impl fmt::Display for UserStoryStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Priority of a user story. Unknown values read as [`Priority::Medium`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
	/// Low priority.
	Low,
	/// Medium priority.
	#[default]
	Medium,
	/// High priority.
	High,
}

impl Priority {
	/// Wire representation of the priority.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Low => "low",
			Self::Medium => "medium",
			Self::High => "high",
		}
	}
}

impl From<String> for Priority {
	fn from(raw: String) -> Self {
		match raw.trim().to_ascii_lowercase().as_str() {
			"low" => Self::Low,
			"high" => Self::High,
			_ => Self::Medium,
		}
	}
}

impl From<Priority> for String {
	fn from(priority: Priority) -> Self {
		priority.as_str().to_string()
	}
}

/// Hierarchy level of a graph node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeTier {
	/// The single root node.
	Project,
	/// One node per visible page.
	Page,
	/// One node per story of a visible page.
	Story,
}

impl NodeTier {
	/// Tag used in node identifiers.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Project => "project",
			Self::Page => "page",
			Self::Story => "story",
		}
	}
}

/// 2D coordinate in graph space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	/// Horizontal coordinate, growing right.
	pub x: f64,
	/// Vertical coordinate, growing down.
	pub y: f64,
}

/// Rendered size of a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
	/// Width in graph units.
	pub width: f64,
	/// Height in graph units.
	pub height: f64,
}

/// Child-free copy of a project with aggregate counts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectSummary {
	/// Project identifier.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Description.
	pub description: String,
	/// Accent color.
	pub color: String,
	/// Technology tags.
	pub tech_stack: Vec<String>,
	/// Pages in the snapshot, visible or not.
	pub page_count: usize,
	/// Stories across all pages.
	pub story_count: usize,
	/// Stories with status `done` across all pages.
	pub done_count: usize,
}

impl ProjectSummary {
	pub(crate) fn of(project: &Project) -> Self {
		let stories = project.pages.iter().flat_map(|page| &page.user_stories);
		let (story_count, done_count) = stories.fold((0, 0), |(total, done), story| {
			(total + 1, done + usize::from(story.status.is_done()))
		});
		Self {
			id: project.id.clone(),
			name: project.name.clone(),
			description: project.description.clone(),
			color: project.color.clone(),
			tech_stack: project.tech_stack.clone(),
			page_count: project.pages.len(),
			story_count,
			done_count,
		}
	}
}

/// Child-free copy of a page with aggregate counts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageSummary {
	/// Page identifier.
	pub id: String,
	/// Title.
	pub title: String,
	/// Description.
	pub description: String,
	/// Stories on this page.
	pub story_count: usize,
	/// Stories on this page with status `done`.
	pub done_count: usize,
}

impl PageSummary {
	pub(crate) fn of(page: &Page) -> Self {
		Self {
			id: page.id.clone(),
			title: page.title.clone(),
			description: page.description.clone(),
			story_count: page.user_stories.len(),
			done_count: page
				.user_stories
				.iter()
				.filter(|story| story.status.is_done())
				.count(),
		}
	}
}

/// Domain entity a node was derived from.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeData {
	/// Root node payload.
	Project(ProjectSummary),
	/// Page node payload, with its parent project for aggregate badges.
	Page {
		/// The page.
		page: PageSummary,
		/// The page's project.
		project: ProjectSummary,
	},
	/// Story node payload.
	Story {
		/// The story.
		story: UserStory,
		/// Identifier of the page owning the story.
		page_id: String,
	},
}

impl NodeData {
	/// Primary text shown on the node.
	pub fn label(&self) -> &str {
		match self {
			Self::Project(project) => &project.name,
			Self::Page { page, .. } => &page.title,
			Self::Story { story, .. } => &story.title,
		}
	}
}

/// A positioned node of the derived project graph.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// Tier-prefixed identifier, stable across builds.
	pub id: String,
	/// Hierarchy level.
	pub tier: NodeTier,
	/// Top-left corner of the node.
	pub position: Position,
	/// Rendered size of the node.
	pub size: Size,
	/// Originating domain entity.
	pub data: NodeData,
}

impl GraphNode {
	/// Layout coordinate the node is centered on.
	pub fn center(&self) -> Position {
		Position {
			x: self.position.x + self.size.width / 2.0,
			y: self.position.y + self.size.height / 2.0,
		}
	}

	/// Whether `(x, y)` falls inside the node's box.
	pub fn contains(&self, x: f64, y: f64) -> bool {
		x >= self.position.x
			&& x <= self.position.x + self.size.width
			&& y >= self.position.y
			&& y <= self.position.y + self.size.height
	}

	/// Status of the originating story, if this is a story node.
	pub fn story_status(&self) -> Option<&UserStoryStatus> {
		match &self.data {
			NodeData::Story { story, .. } => Some(&story.status),
			_ => None,
		}
	}
}

/// A directed, styled edge of the derived project graph.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphEdge {
	/// Identifier derived from both endpoints.
	pub id: String,
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
	/// What the edge connects.
	pub kind: EdgeKind,
	/// Visual style from the edge classifier.
	pub style: EdgeStyle,
}

/// Summary counts shown as badges next to the graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GraphStats {
	/// Page nodes in the graph.
	pub visible_pages: usize,
	/// Story nodes in the graph.
	pub total_stories: usize,
	/// Story nodes whose story is done.
	pub completed_stories: usize,
}

/// Output of one builder invocation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectGraph {
	/// Nodes, project first, then pages in page order, then stories.
	pub nodes: Vec<GraphNode>,
	/// Edges, structural edges first, then story edges.
	pub edges: Vec<GraphEdge>,
}

impl ProjectGraph {
	/// Counts recomputed from the node list.
	pub fn stats(&self) -> GraphStats {
		self.nodes
			.iter()
			.fold(GraphStats::default(), |mut stats, node| {
				match node.tier {
					NodeTier::Page => stats.visible_pages += 1,
					NodeTier::Story => {
						stats.total_stories += 1;
						if node.story_status().is_some_and(UserStoryStatus::is_done) {
							stats.completed_stories += 1;
						}
					}
					NodeTier::Project => {}
				}
				stats
			})
	}

	/// Share of visible stories that are done, `0.0` when there are none.
	pub fn completion_ratio(&self) -> f64 {
		let stats = self.stats();
		if stats.total_stories == 0 {
			return 0.0;
		}
		stats.completed_stories as f64 / stats.total_stories as f64
	}

	/// Looks up a node by id.
	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|node| node.id == id)
	}

	/// Nodes of a single tier, in output order.
	pub fn tier(&self, tier: NodeTier) -> impl Iterator<Item = &GraphNode> {
		self.nodes.iter().filter(move |node| node.tier == tier)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn status_parsing_is_total() {
		assert_eq!(UserStoryStatus::from("done"), UserStoryStatus::Done);
		assert_eq!(UserStoryStatus::from(" In_Progress "), UserStoryStatus::InProgress);
		assert_eq!(UserStoryStatus::from("TODO"), UserStoryStatus::Todo);
		assert_eq!(
			UserStoryStatus::from("blocked"),
			UserStoryStatus::Other("blocked".to_string())
		);
		assert_eq!(UserStoryStatus::Other("blocked".into()).as_str(), "blocked");
	}

	#[test]
	fn story_defaults_when_fields_missing() {
		let story: UserStory = serde_json::from_str(r#"{"id":"s1","title":"Login"}"#).unwrap();
		assert_eq!(story.status, UserStoryStatus::Todo);
		assert_eq!(story.priority, Priority::Medium);
		assert_eq!(story.description, None);
	}

	#[test]
	fn status_serializes_to_wire_form() {
		let json = serde_json::to_string(&UserStoryStatus::InProgress).unwrap();
		assert_eq!(json, r#""in-progress""#);
		let json = serde_json::to_string(&UserStoryStatus::Other("blocked".into())).unwrap();
		assert_eq!(json, r#""blocked""#);
	}

	#[test]
	fn summaries_count_done_stories() {
		let page = Page {
			id: "p".into(),
			title: "Auth".into(),
			user_stories: vec![
				UserStory {
					id: "a".into(),
					status: UserStoryStatus::Done,
					..Default::default()
				},
				UserStory {
					id: "b".into(),
					..Default::default()
				},
			],
			..Default::default()
		};
		let project = Project {
			id: "x".into(),
			pages: vec![page.clone(), Page::default()],
			..Default::default()
		};

		let summary = PageSummary::of(&page);
		assert_eq!((summary.story_count, summary.done_count), (2, 1));
		let summary = ProjectSummary::of(&project);
		assert_eq!(
			(summary.page_count, summary.story_count, summary.done_count),
			(2, 2, 1)
		);
	}

	#[test]
	fn node_center_offsets_half_size() {
		let node = GraphNode {
			id: "page-p".into(),
			tier: NodeTier::Page,
			position: Position { x: -120.0, y: -50.0 },
			size: Size {
				width: 240.0,
				height: 100.0,
			},
			data: NodeData::Project(ProjectSummary::default()),
		};
		assert_eq!(node.center(), Position { x: 0.0, y: 0.0 });
		assert!(node.contains(100.0, 40.0));
		assert!(!node.contains(130.0, 0.0));
	}
}
