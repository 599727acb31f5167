// Data Models
pub mod entry;
pub mod listing;
pub mod operation;
pub mod preview;
pub mod selection;
