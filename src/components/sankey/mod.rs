//! Sankey chart rendered by Plotly.
//!
//! [`Figure::from_spec`] turns a [`crate::diagram::DiagramSpec`] into Plotly's
//! trace and layout objects; [`SankeyChart`] draws a figure signal into the
//! page. Plotly itself is loaded by the host page.

mod component;
pub mod figure;
mod plotly;

pub use component::SankeyChart;
pub use figure::Figure;
