//! Transformation of a yearly flow record into a Sankey diagram description.
//!
//! Node 0 is the hub. Every country of the explicit country list that is
//! present in the record gets one node, in list order, and one link per
//! configured [`FlowDirection`]. The output is plain data; rendering it is up to
//! the caller.

use log::debug;
use serde::Serialize;

mod style;
pub mod theme;

pub use style::{FlowDirection, HoverFormat, LayoutStyle, StyleConfig};
pub use theme::{Color, ColorStyle, FALLBACK_COLOR};

use crate::flows::{CountryCode, FlowRecord, Year};

/// Index of the hub node.
pub const HUB: usize = 0;

/// A directed, weighted link between two nodes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DiagramLink {
	pub source: usize,
	pub target: usize,
	/// Energy carried, never negative. Zero is kept as a zero-width link.
	pub value: f64,
	pub color: Option<String>,
	pub hover: Option<String>,
}

/// Renderable description of one year's flows.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DiagramSpec {
	pub year: Year,
	pub title: String,
	/// Node labels; `labels[0]` is the hub.
	pub labels: Vec<String>,
	/// Node colors, parallel to `labels`, when coloring is configured.
	pub node_colors: Option<Vec<String>>,
	pub links: Vec<DiagramLink>,
}

/// Builds the diagram for `year`.
///
/// Deterministic and total: countries missing from `record` are skipped, and
/// entries of `record` outside `countries` are ignored.
pub fn build(
	year: Year,
	record: &FlowRecord,
	countries: &[CountryCode],
	style: &StyleConfig,
) -> DiagramSpec {
	let mut labels = vec![style.hub.clone()];
	let mut node_colors = style.colors.as_ref().map(|c| vec![c.hub_color().to_css()]);
	let mut links = Vec::with_capacity(countries.len() * style.directions.len());

	for country in countries {
		let Some(flow) = record.get(country.as_str()) else {
			continue;
		};
		let node = labels.len();
		labels.push(country.to_string());

		let country_color = style.colors.as_ref().map(|c| c.resolve(country));
		if let (Some(colors), Some(color)) = (node_colors.as_mut(), country_color) {
			colors.push(color.to_css());
		}
		let link_color = style
			.colors
			.as_ref()
			.zip(country_color)
			.map(|(c, color)| color.with_alpha(c.link_alpha).to_css());

		for direction in &style.directions {
			let (source, target, value) = match direction {
				FlowDirection::Import => (node, HUB, flow.imports),
				FlowDirection::Export => (HUB, node, flow.exports),
			};
			let hover = style
				.hover
				.as_ref()
				.map(|h| h.format(&labels[source], &labels[target], value));
			links.push(DiagramLink {
				source,
				target,
				value,
				color: link_color.clone(),
				hover,
			});
		}
	}

	let ignored = record
		.flows
		.keys()
		.filter(|code| !countries.contains(code))
		.count();
	if ignored > 0 {
		debug!("{year}: ignoring {ignored} countries outside the configured list");
	}

	DiagramSpec {
		year,
		title: style.title_for(year),
		labels,
		node_colors,
		links,
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use proptest::prelude::*;

	use super::*;
	use crate::flows::{CountryFlow, default_countries};

	fn record(year: Year, flows: &[(&str, f64, f64)]) -> FlowRecord {
		let mut record = FlowRecord::new(year);
		for &(code, imports, exports) in flows {
			record.insert(code.into(), CountryFlow::new(imports, exports).unwrap());
		}
		record
	}

	fn triples(spec: &DiagramSpec) -> Vec<(usize, usize, f64)> {
		spec.links.iter().map(|l| (l.source, l.target, l.value)).collect()
	}

	#[test]
	fn single_country_scenario() {
		let spec = build(
			2024,
			&record(2024, &[("FR", 10.5, 3.2)]),
			&["FR".into()],
			&StyleConfig::default(),
		);
		assert_eq!(spec.labels, vec!["Germany", "FR"]);
		assert_eq!(triples(&spec), vec![(1, 0, 10.5), (0, 1, 3.2)]);
		assert_eq!(spec.title, "Energy Flows Between Germany and Neighbors in 2024");
	}

	#[test]
	fn plain_style_puts_exports_first() {
		let spec = build(
			2020,
			&record(2020, &[("FR", 10.5, 3.2), ("NO", 1.0, 2.0)]),
			&["FR".into(), "NO".into()],
			&StyleConfig::plain(),
		);
		assert_eq!(
			triples(&spec),
			vec![(0, 1, 3.2), (1, 0, 10.5), (0, 2, 2.0), (2, 0, 1.0)]
		);
		assert!(spec.node_colors.is_none());
		assert!(spec.links.iter().all(|l| l.color.is_none() && l.hover.is_none()));
	}

	#[test]
	fn single_direction_collapses_links() {
		let style = StyleConfig {
			directions: vec![FlowDirection::Import],
			..StyleConfig::default()
		};
		let spec = build(
			2020,
			&record(2020, &[("FR", 10.5, 3.2), ("NO", 1.0, 2.0)]),
			&["FR".into(), "NO".into()],
			&style,
		);
		assert_eq!(triples(&spec), vec![(1, 0, 10.5), (2, 0, 1.0)]);
	}

	#[test]
	fn absent_countries_are_skipped_in_list_order() {
		let spec = build(
			2030,
			&record(2030, &[("SE", 1.0, 1.0), ("AT", 2.0, 2.0), ("XX", 9.0, 9.0)]),
			&default_countries(),
			&StyleConfig::default(),
		);
		assert_eq!(spec.labels, vec!["Germany", "AT", "SE"]);
		assert_eq!(spec.links.len(), 4);
		assert_eq!(spec.links[2].source, 2);
	}

	#[test]
	fn zero_links_are_kept() {
		let spec = build(
			2020,
			&record(2020, &[("LU", 0.0, 0.0)]),
			&["LU".into()],
			&StyleConfig::default(),
		);
		assert_eq!(triples(&spec), vec![(1, 0, 0.0), (0, 1, 0.0)]);
	}

	#[test]
	fn colors_and_hover_text() {
		let spec = build(
			2024,
			&record(2024, &[("FR", 10.5, 3.2), ("XK", 1.0, 0.5)]),
			&["FR".into(), "XK".into()],
			&StyleConfig::default(),
		);
		assert_eq!(
			spec.node_colors,
			Some(vec!["#263238".into(), "#3949ab".into(), "#808080".into()])
		);
		assert_eq!(spec.links[0].color.as_deref(), Some("rgba(57, 73, 171, 0.4)"));
		assert_eq!(spec.links[2].color.as_deref(), Some("rgba(128, 128, 128, 0.4)"));
		assert_eq!(spec.links[0].hover.as_deref(), Some("FR → Germany: 10.50 TWh"));
		assert_eq!(spec.links[1].hover.as_deref(), Some("Germany → FR: 3.20 TWh"));
	}

	#[test]
	fn empty_record_yields_hub_only() {
		let spec = build(2020, &FlowRecord::new(2020), &default_countries(), &StyleConfig::default());
		assert_eq!(spec.labels, vec!["Germany"]);
		assert!(spec.links.is_empty());
	}

	fn arb_record() -> impl Strategy<Value = FlowRecord> {
		let codes = default_countries();
		proptest::collection::vec(
			(proptest::bool::ANY, 0.0..1e4f64, 0.0..1e4f64),
			codes.len(),
		)
		.prop_map(move |entries| {
			let mut record = FlowRecord::new(2025);
			for (code, (present, imports, exports)) in codes.iter().zip(entries) {
				if present {
					record.insert(code.clone(), CountryFlow::new(imports, exports).unwrap());
				}
			}
			record
		})
	}

	proptest! {
		#[test]
		fn one_hub_plus_one_node_and_two_links_per_country(record in arb_record()) {
			let spec = build(2025, &record, &default_countries(), &StyleConfig::default());
			prop_assert_eq!(spec.labels.len(), 1 + record.len());
			prop_assert_eq!(spec.links.len(), 2 * record.len());
			prop_assert!(spec.links.iter().all(|l| l.value >= 0.0));
			prop_assert!(spec.links.iter().all(|l| (l.source == HUB) != (l.target == HUB)));
		}

		#[test]
		fn build_is_idempotent(record in arb_record()) {
			let style = StyleConfig::default();
			let countries = default_countries();
			prop_assert_eq!(
				build(2025, &record, &countries, &style),
				build(2025, &record, &countries, &style)
			);
		}
	}
}
