use std::collections::HashSet;

use crate::graph::{NodeData, ProjectGraph};

/// Padding kept around the graph when fitting it to the canvas.
const FIT_PADDING: f64 = 40.0;
const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 4.0;

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<usize>,
	pub neighbors: HashSet<usize>,
	pub highlight_t: f64,
	pub prev_node: Option<usize>,
	pub prev_neighbors: HashSet<usize>,
	delay_t: f64,
}

pub struct GraphViewState {
	pub graph: ProjectGraph,
	pub transform: ViewTransform,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
	/// Edges as node indices, rebuilt with the graph.
	edges: Vec<(usize, usize)>,
	fitted: bool,
}

impl GraphViewState {
	pub fn new(graph: ProjectGraph, width: f64, height: f64) -> Self {
		let mut state = Self {
			graph: ProjectGraph::default(),
			edges: Vec::new(),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			flow_time: 0.0,
			fitted: false,
		};
		state.set_graph(graph);
		state
	}

	/// Swaps in a rebuilt graph. The view transform is kept so toggling
	/// pages does not move the camera, except for the first non-trivial graph
	/// which is fitted to the canvas.
	pub fn set_graph(&mut self, graph: ProjectGraph) {
		self.edges = graph
			.edges
			.iter()
			.filter_map(|edge| {
				let src = graph.nodes.iter().position(|n| n.id == edge.source)?;
				let tgt = graph.nodes.iter().position(|n| n.id == edge.target)?;
				Some((src, tgt))
			})
			.collect();
		self.graph = graph;
		self.hover = HoverState::default();
		if !self.fitted && self.graph.nodes.len() > 1 {
			self.fit_to_content();
			self.fitted = true;
		}
	}

	/// Forgets the fitted flag so the next graph is fitted again.
	pub fn refit_next(&mut self) {
		self.fitted = false;
	}

	pub fn fit_to_content(&mut self) {
		let Some(bounds) = self.bounds() else {
			return;
		};
		let (min_x, min_y, max_x, max_y) = bounds;
		let (gw, gh) = (max_x - min_x, max_y - min_y);
		let k = ((self.width - 2.0 * FIT_PADDING) / gw)
			.min((self.height - 2.0 * FIT_PADDING) / gh)
			.clamp(MIN_ZOOM, 1.0);
		self.transform = ViewTransform {
			x: self.width / 2.0 - (min_x + gw / 2.0) * k,
			y: self.height / 2.0 - (min_y + gh / 2.0) * k,
			k,
		};
	}

	fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
		self.graph.nodes.iter().fold(None, |acc, node| {
			let (x0, y0) = (node.position.x, node.position.y);
			let (x1, y1) = (x0 + node.size.width, y0 + node.size.height);
			Some(match acc {
				None => (x0, y0, x1, y1),
				Some((a, b, c, d)) => (a.min(x0), b.min(y0), c.max(x1), d.max(y1)),
			})
		})
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		// Last drawn wins, matching paint order.
		self.graph.nodes.iter().rposition(|node| node.contains(gx, gy))
	}

	/// Page id under the pointer, if the pointer is over a page node.
	pub fn page_at_position(&self, sx: f64, sy: f64) -> Option<String> {
		match &self.graph.nodes[self.node_at_position(sx, sy)?].data {
			NodeData::Page { page, .. } => Some(page.id.clone()),
			_ => None,
		}
	}

	pub fn edge_indices(&self) -> &[(usize, usize)] {
		&self.edges
	}

	pub fn zoom_at(&mut self, x: f64, y: f64, factor: f64) {
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn set_hover(&mut self, node: Option<usize>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Save previous state for fade-out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: usize) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: usize) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn tick(&mut self, dt: f64) {
		self.flow_time += dt;

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{Page, Project, UserStory, VisibilityStore, build};

	fn sample() -> ProjectGraph {
		let project = Project {
			id: "p".into(),
			pages: vec![
				Page {
					id: "a".into(),
					user_stories: vec![UserStory {
						id: "1".into(),
						..Default::default()
					}],
					..Default::default()
				},
				Page {
					id: "b".into(),
					..Default::default()
				},
			],
			..Default::default()
		};
		build(&project, &VisibilityStore::for_project(&project))
	}

	#[test]
	fn edges_resolve_to_indices() {
		let state = GraphViewState::new(sample(), 800.0, 600.0);
		assert_eq!(state.edge_indices(), &[(0, 1), (0, 2), (1, 3)]);
	}

	#[test]
	fn hover_collects_neighbors() {
		let mut state = GraphViewState::new(sample(), 800.0, 600.0);
		state.set_hover(Some(1));
		assert!(state.is_highlighted(0));
		assert!(state.is_highlighted(3));
		assert!(!state.is_highlighted(2));
		state.set_hover(None);
		assert!(state.has_active_highlight());
		assert!(state.is_hovered(1));
	}

	#[test]
	fn fit_centers_content_and_hits_pages() {
		let state = GraphViewState::new(sample(), 800.0, 600.0);
		let page_b = state.graph.node("page-b").unwrap().center();
		let sx = state.transform.x + page_b.x * state.transform.k;
		let sy = state.transform.y + page_b.y * state.transform.k;
		assert_eq!(state.page_at_position(sx, sy).as_deref(), Some("b"));
		assert_eq!(state.page_at_position(-1000.0, -1000.0), None);
	}
}
