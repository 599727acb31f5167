// System Layer
pub mod filesystem;
pub mod trash;
