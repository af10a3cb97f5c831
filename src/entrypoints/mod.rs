// Shared modules
pub(crate) mod cli;
mod metadata;
pub(crate) mod profiling;

// Entry point
pub(crate) mod run;
