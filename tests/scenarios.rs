use project_graph_canvas::graph::{
	LayoutConfig, NEUTRAL_COLOR, NodeTier, Page, Project, ProjectGraph, STRUCTURAL_COLOR,
	SUCCESS_COLOR, UserStory, UserStoryStatus, VisibilityStore, WARNING_COLOR, build,
	parse_project,
};

fn story(id: &str, status: &str) -> UserStory {
	UserStory {
		id: id.to_string(),
		title: format!("Story {id}"),
		status: UserStoryStatus::from(status),
		..Default::default()
	}
}

/// Page B (no stories) listed before page A (three stories).
fn two_page_project() -> Project {
	Project {
		id: "shop".to_string(),
		name: "Shop".to_string(),
		pages: vec![
			Page {
				id: "b".to_string(),
				title: "Page B".to_string(),
				..Default::default()
			},
			Page {
				id: "a".to_string(),
				title: "Page A".to_string(),
				user_stories: vec![
					story("1", "todo"),
					story("2", "done"),
					story("3", "in-progress"),
				],
				..Default::default()
			},
		],
		..Default::default()
	}
}

fn center_x(graph: &ProjectGraph, id: &str) -> f64 {
	graph.node(id).map(|node| node.center().x).unwrap()
}

#[test]
fn project_without_pages() {
	let project = Project {
		id: "empty".to_string(),
		..Default::default()
	};
	let graph = build(&project, &VisibilityStore::for_project(&project));
	assert_eq!(graph.nodes.len(), 1);
	assert_eq!(graph.nodes[0].id, "project-empty");
	assert!(graph.edges.is_empty());
}

#[test]
fn both_pages_visible() {
	let spacing = LayoutConfig::default().node_spacing;
	let project = two_page_project();
	let graph = build(&project, &VisibilityStore::for_project(&project));

	assert_eq!(graph.nodes.len(), 6);
	assert_eq!(graph.edges.len(), 5);
	assert_eq!(center_x(&graph, "page-b"), -spacing / 2.0);
	assert_eq!(center_x(&graph, "page-a"), spacing / 2.0);

	let stats = graph.stats();
	assert_eq!(stats.visible_pages, 2);
	assert_eq!(stats.total_stories, 3);
	assert_eq!(stats.completed_stories, 1);

	let colors: Vec<&str> = graph.edges.iter().map(|e| e.style.color).collect();
	assert_eq!(
		colors,
		vec![
			STRUCTURAL_COLOR,
			STRUCTURAL_COLOR,
			NEUTRAL_COLOR,
			SUCCESS_COLOR,
			WARNING_COLOR
		]
	);
}

#[test]
fn single_page_visible() {
	let project = two_page_project();
	let visibility: VisibilityStore = ["a"].into_iter().collect();
	let graph = build(&project, &visibility);

	assert_eq!(graph.nodes.len(), 5);
	assert_eq!(graph.edges.len(), 4);
	assert_eq!(center_x(&graph, "page-a"), 0.0);
	assert!(graph.node("page-b").is_none());
	assert_eq!(graph.tier(NodeTier::Story).count(), 3);
}

#[test]
fn toggle_round_trip_restores_graph() {
	let project = two_page_project();
	let mut visibility = VisibilityStore::for_project(&project);
	let before = build(&project, &visibility);

	visibility.toggle("a");
	let hidden = build(&project, &visibility);
	assert_eq!(hidden.nodes.len(), 2);
	assert_eq!(center_x(&hidden, "page-b"), 0.0);

	visibility.toggle("a");
	assert_eq!(build(&project, &visibility), before);
}

#[test]
fn unknown_status_gets_neutral_edge() {
	let project = Project {
		id: "p".to_string(),
		pages: vec![Page {
			id: "a".to_string(),
			user_stories: vec![story("1", "blocked")],
			..Default::default()
		}],
		..Default::default()
	};
	let graph = build(&project, &VisibilityStore::for_project(&project));
	let edge = graph
		.edges
		.iter()
		.find(|e| e.target == "story-a-1")
		.unwrap();
	assert_eq!(edge.style.color, NEUTRAL_COLOR);
	assert_eq!(
		graph.nodes[2].story_status(),
		Some(&UserStoryStatus::Other("blocked".to_string()))
	);
}

#[test]
fn hide_all_then_show_all() {
	let project = two_page_project();
	let mut visibility = VisibilityStore::for_project(&project);
	visibility.hide_all();
	let graph = build(&project, &visibility);
	assert_eq!(graph.nodes.len(), 1);
	assert!(graph.edges.is_empty());

	visibility.show_all(project.pages.iter().map(|p| p.id.as_str()));
	assert_eq!(build(&project, &visibility).nodes.len(), 6);
}

#[test]
fn stale_visibility_ids_are_ignored() {
	let project = two_page_project();
	let visibility: VisibilityStore = ["a", "removed-page"].into_iter().collect();
	let graph = build(&project, &visibility);
	assert_eq!(graph.stats().visible_pages, 1);
	assert!(graph.nodes.iter().all(|n| !n.id.contains("removed-page")));
}

#[test]
fn snapshot_without_stories_builds() {
	let project = parse_project(
		r#"{"id": "p", "name": "P", "pages": [{"id": "a", "title": "A"}, {"id": "b", "title": "B"}]}"#,
	)
	.unwrap();
	let graph = build(&project, &VisibilityStore::for_project(&project));
	assert_eq!(graph.nodes.len(), 3);
	assert_eq!(graph.edges.len(), 2);
	assert_eq!(graph.completion_ratio(), 0.0);
}
