//! Deterministic three-band layout.
//!
//! Tier 1 sits alone at `x = 0, y = -level_height`. Tier 2 is a row at `y = 0`
//! centered on `x = 0`. Each page's stories form a tighter row at
//! `y = level_height` centered under that page. Positions handed to nodes are
//! top-left corners, i.e. the computed center minus half the node size.

use serde::{Deserialize, Serialize};

use super::types::{NodeTier, Position, Size};

/// Geometry constants of the layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
	/// Vertical distance between adjacent tiers.
	pub level_height: f64,
	/// Horizontal distance between sibling pages.
	pub node_spacing: f64,
	/// Story spacing as a fraction of `node_spacing`.
	pub story_spacing_ratio: f64,
	/// Size of the project node.
	pub project_size: Size,
	/// Size of page nodes.
	pub page_size: Size,
	/// Size of story nodes.
	pub story_size: Size,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			level_height: 200.0,
			node_spacing: 300.0,
			story_spacing_ratio: 0.6,
			project_size: Size {
				width: 280.0,
				height: 120.0,
			},
			page_size: Size {
				width: 240.0,
				height: 100.0,
			},
			story_size: Size {
				width: 200.0,
				height: 80.0,
			},
		}
	}
}

impl LayoutConfig {
	/// Horizontal distance between sibling stories.
	pub fn story_spacing(&self) -> f64 {
		self.node_spacing * self.story_spacing_ratio
	}

	/// Rendered size of nodes of `tier`.
	pub fn size_of(&self, tier: NodeTier) -> Size {
		match tier {
			NodeTier::Project => self.project_size,
			NodeTier::Page => self.page_size,
			NodeTier::Story => self.story_size,
		}
	}

	/// Vertical band center of `tier`.
	pub fn band_y(&self, tier: NodeTier) -> f64 {
		match tier {
			NodeTier::Project => -self.level_height,
			NodeTier::Page => 0.0,
			NodeTier::Story => self.level_height,
		}
	}

	/// Top-left corner for a node of `tier` centered at `(center_x, band_y(tier))`.
	pub fn place(&self, tier: NodeTier, center_x: f64) -> Position {
		let size = self.size_of(tier);
		Position {
			x: center_x - size.width / 2.0,
			y: self.band_y(tier) - size.height / 2.0,
		}
	}
}

/// Centers of `count` siblings spaced `spacing` apart, centered on `center_x`.
pub fn row_centers(count: usize, center_x: f64, spacing: f64) -> impl Iterator<Item = f64> {
	let start = center_x - count.saturating_sub(1) as f64 * spacing / 2.0;
	(0..count).map(move |i| start + i as f64 * spacing)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn single_row_member_is_centered() {
		assert_eq!(row_centers(1, 42.0, 300.0).collect::<Vec<_>>(), vec![42.0]);
		assert_eq!(row_centers(0, 0.0, 300.0).count(), 0);
	}

	#[test]
	fn rows_are_symmetric() {
		let xs: Vec<f64> = row_centers(3, 0.0, 300.0).collect();
		assert_eq!(xs, vec![-300.0, 0.0, 300.0]);
		let xs: Vec<f64> = row_centers(2, 100.0, 180.0).collect();
		assert_eq!(xs, vec![10.0, 190.0]);
	}

	#[test]
	fn place_subtracts_half_size() {
		let config = LayoutConfig::default();
		assert_eq!(
			config.place(NodeTier::Project, 0.0),
			Position {
				x: -140.0,
				y: -260.0
			}
		);
		assert_eq!(
			config.place(NodeTier::Story, 90.0),
			Position { x: -10.0, y: 160.0 }
		);
		assert_eq!(config.story_spacing(), 180.0);
	}

	#[test]
	fn partial_config_json_keeps_defaults() {
		let config: LayoutConfig = serde_json::from_str(r#"{"node_spacing": 400}"#).unwrap();
		assert_eq!(config.node_spacing, 400.0);
		assert_eq!(config.level_height, 200.0);
		assert_eq!(config.story_spacing(), 240.0);
	}
}
