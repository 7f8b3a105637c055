pub mod language_toggle;
pub mod workflow_editor;
