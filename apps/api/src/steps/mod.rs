// Wizard step configuration: which steps each document type has, in what order,
// and which steps must be finished before another one opens.

pub mod config;
pub mod handlers;
pub mod navigation;
