//! Dashboard configuration and provider construction.
//!
//! The host page embeds the configuration as JSON. Every field is optional;
//! an empty object gives a static-table dashboard over the default countries.

use std::sync::Arc;

use log::info;
use serde::Deserialize;

use crate::diagram::StyleConfig;
use crate::flows::{
	ChannelMap, CountryCode, DEFAULT_SEED, EmbeddedRuns, FlowError, FlowProvider, FlowResult,
	RetryPolicy, SimulationFlows, StaticFlowTable, SyntheticFlows, YearRange, default_countries,
};

/// Which provider strategy backs the dashboard.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
	/// Precomputed table.
	#[default]
	Static,
	/// Per-year simulation runs.
	Simulation {
		#[serde(default)]
		channels: ChannelMap,
		#[serde(default = "default_retry_attempts")]
		retry_attempts: u32,
	},
	/// Seeded placeholder values.
	Synthetic {
		#[serde(default = "default_seed")]
		seed: u64,
		#[serde(default = "default_low")]
		low: u32,
		#[serde(default = "default_high")]
		high: u32,
	},
}

fn default_retry_attempts() -> u32 {
	RetryPolicy::default().max_attempts
}

fn default_seed() -> u64 {
	DEFAULT_SEED
}

fn default_low() -> u32 {
	500
}

fn default_high() -> u32 {
	5000
}

/// Top-level dashboard configuration.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
	/// Page heading.
	pub heading: Option<String>,
	/// Fixed country order. Defaults to Germany's neighbours.
	pub countries: Option<Vec<CountryCode>>,
	/// Selectable years. Static and simulation sources default to the years
	/// present in their data.
	pub years: Option<YearRange>,
	pub source: SourceConfig,
	pub style: StyleConfig,
}

/// Raw data documents supplied next to the configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct DataDocuments<'a> {
	/// Static flow table JSON.
	pub flow_table: Option<&'a str>,
	/// Simulation runs JSON, keyed by year.
	pub simulation_runs: Option<&'a str>,
}

impl AppConfig {
	pub fn from_json(json: &str) -> FlowResult<Self> {
		let config: Self = serde_json::from_str(json)?;
		config.validate()?;
		Ok(config)
	}

	/// Rejects settings that deserialize but cannot describe a dashboard.
	pub fn validate(&self) -> FlowResult<()> {
		if let Some(years) = self.years {
			YearRange::new(years.min, years.max)?;
		}
		Ok(())
	}

	/// Configured heading, or one naming the hub and the years served.
	pub fn heading(&self, years: YearRange) -> String {
		self.heading.clone().unwrap_or_else(|| {
			format!(
				"{}'s Cross-Border Energy Flows ({}-{})",
				self.style.hub, years.min, years.max
			)
		})
	}

	/// Builds the configured provider. Fails when the source's data is missing
	/// or invalid.
	pub fn provider(&self, docs: DataDocuments<'_>) -> FlowResult<Arc<dyn FlowProvider>> {
		self.validate()?;
		let provider: Arc<dyn FlowProvider> = match &self.source {
			SourceConfig::Static => {
				let json = docs
					.flow_table
					.ok_or_else(|| FlowError::Config("static source needs a flow table".into()))?;
				Arc::new(StaticFlowTable::from_json(
					json,
					self.countries.clone(),
					self.years,
				)?)
			}
			SourceConfig::Simulation {
				channels,
				retry_attempts,
			} => {
				let json = docs.simulation_runs.ok_or_else(|| {
					FlowError::Config("simulation source needs simulation runs".into())
				})?;
				let runs = EmbeddedRuns::from_json(json)?;
				let years = match self.years.or_else(|| runs.span()) {
					Some(years) => years,
					None => return Err(FlowError::Integrity("no simulation runs".into())),
				};
				Arc::new(SimulationFlows::new(
					runs,
					self.countries.clone().unwrap_or_else(default_countries),
					years,
					channels.clone(),
					RetryPolicy {
						max_attempts: *retry_attempts,
					},
				)?)
			}
			SourceConfig::Synthetic { seed, low, high } => Arc::new(SyntheticFlows::new(
				self.countries.clone().unwrap_or_else(default_countries),
				self.years.unwrap_or_default(),
				*seed,
				*low,
				*high,
			)?),
		};

		let years = provider.years();
		info!(
			"flow provider ready: {:?}, years {}..={}, {} countries",
			self.source,
			years.min,
			years.max,
			provider.countries().len()
		);
		Ok(provider)
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::diagram::FlowDirection;

	#[test]
	fn empty_config_is_static_with_defaults() {
		let config = AppConfig::from_json("{}").unwrap();
		assert_eq!(config.source, SourceConfig::Static);
		assert_eq!(config.style, StyleConfig::default());
		assert_eq!(
			config.heading(YearRange::default()),
			"Germany's Cross-Border Energy Flows (2020-2030)"
		);
	}

	#[test]
	fn configured_heading_is_used_verbatim() {
		let config = AppConfig::from_json(r#"{ "heading": "Flows" }"#).unwrap();
		assert_eq!(config.heading(YearRange::default()), "Flows");
	}

	#[test]
	fn inverted_year_range_is_a_config_error() {
		let json = r#"{ "years": { "min": 2030, "max": 2020 }, "source": { "kind": "synthetic" } }"#;
		assert!(matches!(AppConfig::from_json(json), Err(FlowError::Config(_))));

		let config = AppConfig {
			years: Some(YearRange { min: 2030, max: 2020 }),
			source: SourceConfig::Synthetic {
				seed: DEFAULT_SEED,
				low: 500,
				high: 5000,
			},
			..AppConfig::default()
		};
		assert!(matches!(
			config.provider(DataDocuments::default()),
			Err(FlowError::Config(_))
		));
	}

	#[test]
	fn parses_synthetic_source() {
		let config = AppConfig::from_json(
			r#"{
				"source": { "kind": "synthetic", "seed": 7 },
				"years": { "min": 2020, "max": 2022 },
				"countries": ["FR", "NO"],
				"style": { "directions": ["export"] }
			}"#,
		)
		.unwrap();
		assert_eq!(
			config.source,
			SourceConfig::Synthetic {
				seed: 7,
				low: 500,
				high: 5000
			}
		);
		assert_eq!(config.style.directions, vec![FlowDirection::Export]);

		let provider = config.provider(DataDocuments::default()).unwrap();
		assert_eq!(provider.years(), YearRange { min: 2020, max: 2022 });
		assert_eq!(provider.flows(2021).unwrap().len(), 2);
	}

	#[test]
	fn static_source_requires_table() {
		let config = AppConfig::default();
		assert!(matches!(
			config.provider(DataDocuments::default()),
			Err(FlowError::Config(_))
		));

		let docs = DataDocuments {
			flow_table: Some(
				r#"{ "2020": { "imports": { "FR": 1.0 }, "exports": { "FR": 2.0 } } }"#,
			),
			..Default::default()
		};
		let config = AppConfig {
			countries: Some(vec!["FR".into()]),
			..AppConfig::default()
		};
		let provider = config.provider(docs).unwrap();
		assert_eq!(provider.years(), YearRange { min: 2020, max: 2020 });
	}

	#[test]
	fn simulation_source_spans_embedded_years() {
		let config = AppConfig::from_json(
			r#"{ "source": { "kind": "simulation" }, "countries": ["FR"] }"#,
		)
		.unwrap();
		let docs = DataDocuments {
			simulation_runs: Some(
				r#"{
					"2024": { "channels": { "DE-FR": [1.0e6], "FR-DE": [2.0e6] } },
					"2026": { "channels": { "DE-FR": [1.0e6] } }
				}"#,
			),
			..Default::default()
		};
		let provider = config.provider(docs).unwrap();
		assert_eq!(provider.years(), YearRange { min: 2024, max: 2026 });
		assert_eq!(provider.flows(2024).unwrap().len(), 1);
		assert!(provider.flows(2026).unwrap().is_empty());
		assert!(provider.flows(2025).is_err());
	}
}
