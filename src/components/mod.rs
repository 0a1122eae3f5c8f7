pub mod project_graph;
