//! Presentation parameters for the flow diagram.

use serde::Deserialize;

use super::theme::ColorStyle;

/// Direction of a link relative to the hub.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowDirection {
	/// Country → hub, weighted by the import value.
	Import,
	/// Hub → country, weighted by the export value.
	Export,
}

/// Hover text formatting.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HoverFormat {
	/// Decimal places of the magnitude.
	pub precision: usize,
	/// Unit appended after the magnitude.
	pub unit: String,
}

impl Default for HoverFormat {
	fn default() -> Self {
		Self {
			precision: 2,
			unit: "TWh".into(),
		}
	}
}

impl HoverFormat {
	pub fn format(&self, source: &str, target: &str, value: f64) -> String {
		format!(
			"{source} → {target}: {value:.prec$} {unit}",
			prec = self.precision,
			unit = self.unit
		)
	}
}

/// Layout parameters handed through to the rendering surface.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutStyle {
	/// Title template; `{hub}` and `{year}` are substituted.
	pub title: String,
	/// Vertical gap between nodes in pixels.
	pub node_pad: f64,
	/// Node bar width in pixels.
	pub node_thickness: f64,
	pub node_line_color: String,
	pub node_line_width: f64,
	pub font_size: f64,
}

impl Default for LayoutStyle {
	fn default() -> Self {
		Self {
			title: "Energy Flows Between {hub} and Neighbors in {year}".into(),
			node_pad: 15.0,
			node_thickness: 20.0,
			node_line_color: "black".into(),
			node_line_width: 0.5,
			font_size: 10.0,
		}
	}
}

/// Everything that varies between dashboard presentations.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
	/// Label of node 0.
	pub hub: String,
	/// Links emitted per country, in this order.
	pub directions: Vec<FlowDirection>,
	/// Node and link colors; `None` leaves coloring to the renderer.
	pub colors: Option<ColorStyle>,
	/// Hover text; `None` uses the renderer's default hover.
	pub hover: Option<HoverFormat>,
	pub layout: LayoutStyle,
}

impl StyleConfig {
	/// Bare Plotly defaults: exports before imports, no colors,
	/// no custom hover text.
	pub fn plain() -> Self {
		Self {
			directions: vec![FlowDirection::Export, FlowDirection::Import],
			colors: None,
			hover: None,
			..Self::default()
		}
	}

	pub fn title_for(&self, year: impl std::fmt::Display) -> String {
		self.layout
			.title
			.replace("{hub}", &self.hub)
			.replace("{year}", &year.to_string())
	}
}

impl Default for StyleConfig {
	fn default() -> Self {
		Self {
			hub: "Germany".into(),
			directions: vec![FlowDirection::Import, FlowDirection::Export],
			colors: Some(ColorStyle::default()),
			hover: Some(HoverFormat::default()),
			layout: LayoutStyle::default(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hover_uses_fixed_precision() {
		let hover = HoverFormat::default();
		assert_eq!(hover.format("FR", "Germany", 10.5), "FR → Germany: 10.50 TWh");
		let coarse = HoverFormat {
			precision: 1,
			unit: "GWh".into(),
		};
		assert_eq!(coarse.format("Germany", "NO", 3.24), "Germany → NO: 3.2 GWh");
	}

	#[test]
	fn title_substitutes_placeholders() {
		let style = StyleConfig::default();
		assert_eq!(
			style.title_for(2024),
			"Energy Flows Between Germany and Neighbors in 2024"
		);
	}

	#[test]
	fn partial_config_keeps_defaults() {
		let style: StyleConfig =
			serde_json::from_str(r#"{ "directions": ["import"], "hover": { "precision": 1 } }"#)
				.unwrap();
		assert_eq!(style.directions, vec![FlowDirection::Import]);
		assert_eq!(style.hover.unwrap().unit, "TWh");
		assert_eq!(style.hub, "Germany");
		assert!(style.colors.is_some());
	}
}
