//! Page visibility state that persists across graph rebuilds.

use std::collections::HashSet;

use super::types::Project;

/// Set of page ids currently shown in the graph.
///
/// The store remembers which project it was seeded from so that rebuilding
/// the graph for the same project keeps the user's choices, while switching
/// projects starts again with every page visible.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibilityStore {
	project_id: Option<String>,
	visible: HashSet<String>,
}

impl VisibilityStore {
	/// An empty store not tied to any project.
	pub fn new() -> Self {
		Self::default()
	}

	/// A store showing every page of `project`.
	pub fn for_project(project: &Project) -> Self {
		let mut store = Self::new();
		store.sync_project(project);
		store
	}

	/// Replaces the set with exactly `page_ids`.
	pub fn initialize<I, S>(&mut self, page_ids: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.visible = page_ids.into_iter().map(Into::into).collect();
	}

	/// Re-seeds with every page of `project` if it is not the project the
	/// store was last seeded from. Returns whether a reset happened.
	pub fn sync_project(&mut self, project: &Project) -> bool {
		if self.project_id.as_deref() == Some(project.id.as_str()) {
			return false;
		}
		log::debug!(
			"visibility reset for project {} ({} pages)",
			project.id,
			project.pages.len()
		);
		self.project_id = Some(project.id.clone());
		self.initialize(project.pages.iter().map(|page| page.id.as_str()));
		true
	}

	/// Flips one page. Returns whether the page is visible afterwards.
	pub fn toggle(&mut self, page_id: &str) -> bool {
		if self.visible.remove(page_id) {
			false
		} else {
			self.visible.insert(page_id.to_string());
			true
		}
	}

	/// Shows exactly `page_ids`.
	pub fn show_all<I, S>(&mut self, page_ids: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.initialize(page_ids);
	}

	/// Hides every page.
	pub fn hide_all(&mut self) {
		self.visible.clear();
	}

	/// Whether `page_id` is shown.
	pub fn is_visible(&self, page_id: &str) -> bool {
		self.visible.contains(page_id)
	}

	/// Number of shown ids, including ids unknown to the current project.
	pub fn len(&self) -> usize {
		self.visible.len()
	}

	/// Whether nothing is shown.
	pub fn is_empty(&self) -> bool {
		self.visible.is_empty()
	}

	/// Shown ids in sorted order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		let mut ids: Vec<&str> = self.visible.iter().map(String::as_str).collect();
		ids.sort_unstable();
		ids.into_iter()
	}

	/// Project the store was last seeded from.
	pub fn project_id(&self) -> Option<&str> {
		self.project_id.as_deref()
	}
}

impl<S: Into<String>> FromIterator<S> for VisibilityStore {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		let mut store = Self::new();
		store.initialize(iter);
		store
	}
}
