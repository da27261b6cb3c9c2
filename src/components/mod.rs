//! UI components.

pub mod dashboard;
pub mod sankey;
