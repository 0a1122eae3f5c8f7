//! Derives the three-tier project graph from a snapshot and a visibility set.

use std::collections::HashSet;

use super::edges::{EdgeKind, classify};
use super::layout::{LayoutConfig, row_centers};
use super::types::{
	GraphEdge, GraphNode, NodeData, NodeTier, Page, PageSummary, Project, ProjectGraph,
	ProjectSummary, UserStory,
};
use super::visibility::VisibilityStore;

/// Builds the graph with the default layout.
pub fn build(project: &Project, visibility: &VisibilityStore) -> ProjectGraph {
	build_with(project, visibility, &LayoutConfig::default())
}

/// Builds the graph with an explicit layout.
///
/// Never fails: an empty project or an empty visibility set yields the
/// project node alone, and duplicate ids in the snapshot are skipped after
/// their first occurrence. A story whose node id was already emitted by an
/// earlier page (`a-b`/`c` against `a`/`b-c`) is skipped the same way.
pub fn build_with(
	project: &Project,
	visibility: &VisibilityStore,
	config: &LayoutConfig,
) -> ProjectGraph {
	let summary = ProjectSummary::of(project);
	let root_id = project_node_id(&project.id);
	let mut graph = ProjectGraph::default();

	graph.nodes.push(GraphNode {
		id: root_id.clone(),
		tier: NodeTier::Project,
		position: config.place(NodeTier::Project, 0.0),
		size: config.size_of(NodeTier::Project),
		data: NodeData::Project(summary.clone()),
	});

	let pages = visible_pages(project, visibility);
	let page_xs = row_centers(pages.len(), 0.0, config.node_spacing);

	let mut story_nodes = Vec::new();
	let mut story_edges = Vec::new();
	let mut emitted = HashSet::new();
	for (page, page_x) in pages.into_iter().zip(page_xs) {
		let page_id = page_node_id(&page.id);

		graph.nodes.push(GraphNode {
			id: page_id.clone(),
			tier: NodeTier::Page,
			position: config.place(NodeTier::Page, page_x),
			size: config.size_of(NodeTier::Page),
			data: NodeData::Page {
				page: PageSummary::of(page),
				project: summary.clone(),
			},
		});
		graph
			.edges
			.push(edge(root_id.clone(), page_id.clone(), EdgeKind::Structural));

		let stories = unique_stories(page, &mut emitted);
		let story_xs = row_centers(stories.len(), page_x, config.story_spacing());
		for ((story, story_id), story_x) in stories.into_iter().zip(story_xs) {
			story_nodes.push(GraphNode {
				id: story_id.clone(),
				tier: NodeTier::Story,
				position: config.place(NodeTier::Story, story_x),
				size: config.size_of(NodeTier::Story),
				data: NodeData::Story {
					story: story.clone(),
					page_id: page.id.clone(),
				},
			});
			story_edges.push(edge(
				page_id.clone(),
				story_id,
				EdgeKind::Status(story.status.clone()),
			));
		}
	}
	graph.nodes.append(&mut story_nodes);
	graph.edges.append(&mut story_edges);

	log::debug!(
		"built graph for project {}: {} nodes, {} edges",
		project.id,
		graph.nodes.len(),
		graph.edges.len()
	);
	graph
}

/// Node id of the project node.
pub fn project_node_id(project_id: &str) -> String {
	format!("{}-{project_id}", NodeTier::Project.as_str())
}

/// Node id of a page node.
pub fn page_node_id(page_id: &str) -> String {
	format!("{}-{page_id}", NodeTier::Page.as_str())
}

/// Node id of a story node. Story ids are only unique within their page.
pub fn story_node_id(page_id: &str, story_id: &str) -> String {
	format!("{}-{page_id}-{story_id}", NodeTier::Story.as_str())
}

/// Edge id for an edge between two node ids.
pub fn edge_id(source: &str, target: &str) -> String {
	format!("edge-{source}-{target}")
}

fn edge(source: String, target: String, kind: EdgeKind) -> GraphEdge {
	GraphEdge {
		id: edge_id(&source, &target),
		style: classify(&kind),
		source,
		target,
		kind,
	}
}

fn visible_pages<'a>(project: &'a Project, visibility: &VisibilityStore) -> Vec<&'a Page> {
	let mut seen = HashSet::new();
	project
		.pages
		.iter()
		.filter(|page| visibility.is_visible(&page.id))
		.filter(|page| {
			let first = seen.insert(page.id.as_str());
			if !first {
				log::warn!(
					"project {} has duplicate page id {}; skipping",
					project.id,
					page.id
				);
			}
			first
		})
		.collect()
}

/// Stories of `page` paired with their node ids, dropping any whose node id
/// is already in `emitted`.
fn unique_stories<'a>(
	page: &'a Page,
	emitted: &mut HashSet<String>,
) -> Vec<(&'a UserStory, String)> {
	page.user_stories
		.iter()
		.filter_map(|story| {
			let id = story_node_id(&page.id, &story.id);
			if !emitted.insert(id.clone()) {
				log::warn!(
					"page {} story {} maps to already used node id {id}; skipping",
					page.id,
					story.id
				);
				return None;
			}
			Some((story, id))
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::edges::{NEUTRAL_COLOR, STRUCTURAL_COLOR, SUCCESS_COLOR};
	use crate::graph::types::UserStoryStatus;

	fn story(id: &str, status: &str) -> UserStory {
		UserStory {
			id: id.to_string(),
			title: format!("Story {id}"),
			status: UserStoryStatus::from(status),
			..Default::default()
		}
	}

	fn page(id: &str, stories: Vec<UserStory>) -> Page {
		Page {
			id: id.to_string(),
			title: format!("Page {id}"),
			user_stories: stories,
			..Default::default()
		}
	}

	fn project(pages: Vec<Page>) -> Project {
		Project {
			id: "demo".to_string(),
			name: "Demo".to_string(),
			pages,
			..Default::default()
		}
	}

	fn ids(graph: &ProjectGraph) -> Vec<&str> {
		graph.nodes.iter().map(|node| node.id.as_str()).collect()
	}

	#[test]
	fn empty_project_yields_root_only() {
		let graph = build(&project(vec![]), &VisibilityStore::new());
		assert_eq!(ids(&graph), vec!["project-demo"]);
		assert!(graph.edges.is_empty());
		let root = &graph.nodes[0];
		assert_eq!(root.center().x, 0.0);
		assert_eq!(root.center().y, -200.0);
	}

	#[test]
	fn node_ids_follow_tier_prefixes() {
		let project = project(vec![page("a", vec![story("1", "todo")])]);
		let graph = build(&project, &VisibilityStore::for_project(&project));
		assert_eq!(ids(&graph), vec!["project-demo", "page-a", "story-a-1"]);
		let edge_ids: Vec<&str> = graph.edges.iter().map(|e| e.id.as_str()).collect();
		assert_eq!(
			edge_ids,
			vec![
				"edge-project-demo-page-a",
				"edge-page-a-story-a-1"
			]
		);
	}

	#[test]
	fn stories_center_under_their_page() {
		let project = project(vec![
			page("a", vec![story("1", "todo"), story("2", "done")]),
			page("b", vec![story("1", "in-progress")]),
		]);
		let graph = build(&project, &VisibilityStore::for_project(&project));

		let center = |id: &str| graph.node(id).map(GraphNode::center).unwrap();
		assert_eq!(center("page-a").x, -150.0);
		assert_eq!(center("page-b").x, 150.0);
		assert_eq!(center("story-a-1").x, -240.0);
		assert_eq!(center("story-a-2").x, -60.0);
		assert_eq!(center("story-b-1").x, 150.0);
		assert_eq!(center("story-b-1").y, 200.0);
	}

	#[test]
	fn edges_are_styled_by_kind() {
		let project = project(vec![page("a", vec![story("1", "done"), story("2", "blocked")])]);
		let graph = build(&project, &VisibilityStore::for_project(&project));
		let colors: Vec<&str> = graph.edges.iter().map(|e| e.style.color).collect();
		assert_eq!(colors, vec![STRUCTURAL_COLOR, SUCCESS_COLOR, NEUTRAL_COLOR]);
		assert_eq!(graph.edges[0].source, "project-demo");
		assert_eq!(graph.edges[0].target, "page-a");
	}

	#[test]
	fn duplicate_ids_are_skipped() {
		let project = project(vec![
			page("a", vec![story("1", "todo"), story("1", "done")]),
			page("a", vec![story("9", "todo")]),
		]);
		let graph = build(&project, &VisibilityStore::for_project(&project));
		assert_eq!(ids(&graph), vec!["project-demo", "page-a", "story-a-1"]);
		assert_eq!(graph.edges.len(), 2);
		assert_eq!(graph.node("page-a").unwrap().center().x, 0.0);
	}

	#[test]
	fn hyphenated_ids_do_not_collide_across_pages() {
		let project = project(vec![
			page("a-b", vec![story("c", "todo")]),
			page("a", vec![story("b-c", "done"), story("d", "todo")]),
		]);
		let graph = build(&project, &VisibilityStore::for_project(&project));

		assert_eq!(
			ids(&graph),
			vec!["project-demo", "page-a-b", "page-a", "story-a-b-c", "story-a-d"]
		);
		let unique: HashSet<&str> = ids(&graph).into_iter().collect();
		assert_eq!(unique.len(), graph.nodes.len());
		let targets: Vec<&str> = graph.edges.iter().map(|e| e.target.as_str()).collect();
		assert_eq!(targets, vec!["page-a-b", "page-a", "story-a-b-c", "story-a-d"]);
		assert_eq!(graph.edges[2].source, "page-a-b");
		// The surviving story of page `a` is centered alone under it.
		assert_eq!(
			graph.node("story-a-d").unwrap().center().x,
			graph.node("page-a").unwrap().center().x
		);
	}

	#[test]
	fn page_nodes_carry_project_stats() {
		let project = project(vec![
			page("a", vec![story("1", "done")]),
			page("b", vec![story("1", "todo")]),
		]);
		let visibility: VisibilityStore = ["a"].into_iter().collect();
		let graph = build(&project, &visibility);
		let Some(GraphNode {
			data: NodeData::Page { page, project },
			..
		}) = graph.node("page-a")
		else {
			panic!("page-a missing");
		};
		assert_eq!((page.story_count, page.done_count), (1, 1));
		assert_eq!((project.page_count, project.story_count), (2, 2));
		assert_eq!(graph.stats().visible_pages, 1);
	}

	#[test]
	fn custom_layout_is_respected() {
		let config = LayoutConfig {
			level_height: 100.0,
			node_spacing: 500.0,
			..Default::default()
		};
		let project = project(vec![page("a", vec![]), page("b", vec![])]);
		let graph = build_with(&project, &VisibilityStore::for_project(&project), &config);
		assert_eq!(graph.node("page-b").unwrap().center().x, 250.0);
		assert_eq!(graph.node("project-demo").unwrap().center().y, -100.0);
	}
}
