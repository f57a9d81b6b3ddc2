pub mod app;
pub mod file_picker;
pub mod image_preview;
pub mod pannable_preview;
pub mod progress_panel;
pub mod session_bar;
pub mod settings_panel;
