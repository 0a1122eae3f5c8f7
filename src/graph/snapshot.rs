//! Parsing of project snapshots as served by the REST backend.

use super::types::Project;

/// Errors reading a project snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
	/// The payload is not valid snapshot JSON.
	#[error("invalid snapshot json: {0}")]
	Json(#[from] serde_json::Error),

	/// An entity that must be addressable has an empty id.
	#[error("missing id: {0}")]
	MissingId(String),
}

/// Parses a single project.
pub fn parse_project(json: &str) -> Result<Project, SnapshotError> {
	let project: Project = serde_json::from_str(json)?;
	check_ids(&project)?;
	Ok(project)
}

/// Parses a list of projects.
pub fn parse_projects(json: &str) -> Result<Vec<Project>, SnapshotError> {
	let projects: Vec<Project> = serde_json::from_str(json)?;
	for project in &projects {
		check_ids(project)?;
	}
	Ok(projects)
}

fn check_ids(project: &Project) -> Result<(), SnapshotError> {
	if project.id.trim().is_empty() {
		return Err(SnapshotError::MissingId(format!("project {:?}", project.name)));
	}
	if let Some(page) = project.pages.iter().find(|page| page.id.trim().is_empty()) {
		return Err(SnapshotError::MissingId(format!(
			"page {:?} of project {}",
			page.title, project.id
		)));
	}
	Ok(())
}
