mod component;
mod geometry;
mod gesture;
mod graph;
mod render;
mod state;
mod types;

pub use component::WorkflowEditor;
