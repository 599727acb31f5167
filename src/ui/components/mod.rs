// UI Components
pub mod folder_pane;
pub mod info_bar;
pub mod preview_pane;
pub mod prompt;
pub mod warning;

// Re-export components for convenience
pub use folder_pane::FolderPane;
pub use info_bar::InfoBar;
pub use preview_pane::PreviewPane;
pub use prompt::PromptBox;
pub use warning::WarningScreen;
