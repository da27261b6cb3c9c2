//! Plotly figure description of a [`DiagramSpec`].
//!
//! Splits the per-link tuples into the parallel arrays Plotly's `sankey` trace
//! expects and carries the layout parameters of the style.

use serde::Serialize;

use crate::diagram::{DiagramSpec, LayoutStyle};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeLine {
	pub color: String,
	pub width: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SankeyNodes {
	pub pad: f64,
	pub thickness: f64,
	pub line: NodeLine,
	pub label: Vec<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub color: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SankeyLinks {
	pub source: Vec<usize>,
	pub target: Vec<usize>,
	pub value: Vec<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub color: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub customdata: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub hovertemplate: Option<&'static str>,
}

/// A single `sankey` trace.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SankeyTrace {
	#[serde(rename = "type")]
	pub kind: &'static str,
	pub orientation: &'static str,
	pub node: SankeyNodes,
	pub link: SankeyLinks,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Title {
	pub text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Font {
	pub size: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Layout {
	pub title: Title,
	pub font: Font,
}

/// Arguments of `Plotly.react(element, data, layout)`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Figure {
	pub data: Vec<SankeyTrace>,
	pub layout: Layout,
}

impl Figure {
	pub fn from_spec(spec: &DiagramSpec, layout: &LayoutStyle) -> Self {
		let links = &spec.links;
		// Per-link options become arrays only when every link has one.
		let color = links
			.iter()
			.map(|l| l.color.clone())
			.collect::<Option<Vec<_>>>()
			.filter(|_| !links.is_empty());
		let customdata = links
			.iter()
			.map(|l| l.hover.clone())
			.collect::<Option<Vec<_>>>()
			.filter(|_| !links.is_empty());
		let hovertemplate = customdata.as_ref().map(|_| "%{customdata}<extra></extra>");

		Self {
			data: vec![SankeyTrace {
				kind: "sankey",
				orientation: "h",
				node: SankeyNodes {
					pad: layout.node_pad,
					thickness: layout.node_thickness,
					line: NodeLine {
						color: layout.node_line_color.clone(),
						width: layout.node_line_width,
					},
					label: spec.labels.clone(),
					color: spec.node_colors.clone(),
				},
				link: SankeyLinks {
					source: links.iter().map(|l| l.source).collect(),
					target: links.iter().map(|l| l.target).collect(),
					value: links.iter().map(|l| l.value).collect(),
					color,
					customdata,
					hovertemplate,
				},
			}],
			layout: Layout {
				title: Title {
					text: spec.title.clone(),
				},
				font: Font {
					size: layout.font_size,
				},
			},
		}
	}
}
