// UI Layer
pub mod components;
pub mod layout;
pub mod theme;

// Re-export layout types for convenience
pub use layout::{LayoutManager, LayoutMode};
pub use theme::Theme;

// Re-export components
pub use components::{FolderPane, InfoBar, PreviewPane, PromptBox, WarningScreen};
