// Core Logic
pub mod commands;
pub mod navigator;
pub mod processor;
