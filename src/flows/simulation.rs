//! Flow records reduced from power-flow simulation results.
//!
//! Each simulated year exposes one signed flow time series per transfer
//! channel. A country is linked to the hub by two directional channels: one
//! carrying exports (hub → country) and one carrying imports (country → hub).
//! Yearly totals are computed by clipping every sample at zero, weighting it by
//! its snapshot duration and summing, then converting MWh to TWh.

use std::collections::BTreeMap;

use log::{debug, warn};
use serde::Deserialize;

use super::{
	CountryCode, CountryFlow, FlowError, FlowProvider, FlowRecord, FlowResult, SourceError, Year,
	YearRange,
};

/// Scale factor from the simulation's MWh to the reported TWh.
pub const MWH_TO_TWH: f64 = 1e-6;

/// Simulation output for one year.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SimulationRun {
	/// Signed flow per snapshot (MW), keyed by channel name.
	pub channels: BTreeMap<String, Vec<f64>>,
	/// Duration of each snapshot in hours. Missing means one hour each.
	#[serde(default)]
	pub weights: Option<Vec<f64>>,
}

impl SimulationRun {
	/// Checks that every sample is finite and that `weights`, when present,
	/// has one finite non-negative entry per sample of every channel.
	pub fn validate(&self) -> Result<(), String> {
		for (name, series) in &self.channels {
			if let Some(t) = series.iter().position(|p| !p.is_finite()) {
				return Err(format!("channel {name}: sample {t} is not a finite number"));
			}
			match &self.weights {
				Some(weights) if weights.len() != series.len() => {
					return Err(format!(
						"channel {name} has {} samples but there are {} weights",
						series.len(),
						weights.len()
					));
				}
				_ => {}
			}
		}
		let weights = self.weights.as_deref().unwrap_or_default();
		if let Some(t) = weights.iter().position(|w| !w.is_finite() || *w < 0.0) {
			return Err(format!("weight {t} must be a non-negative number"));
		}
		Ok(())
	}

	/// Total positive energy carried by `channel` in MWh, or `None` if the
	/// channel does not exist. Assumes a validated run.
	pub fn clipped_total(&self, channel: &str) -> Option<f64> {
		let series = self.channels.get(channel)?;
		let total = series
			.iter()
			.enumerate()
			.map(|(t, p)| {
				let weight = self
					.weights
					.as_ref()
					.and_then(|w| w.get(t).copied())
					.unwrap_or(1.0);
				p.max(0.0) * weight
			})
			.sum();
		Some(total)
	}
}

/// Export and import channel names for one country.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ChannelPair {
	/// Channel carrying energy from the hub into the country.
	pub export: String,
	/// Channel carrying energy from the country into the hub.
	pub import: String,
}

/// Resolves the transfer channels belonging to each country.
///
/// Countries without an override follow the `"{hub}-{country}"` /
/// `"{country}-{hub}"` naming convention.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ChannelMap {
	/// Hub prefix used by the naming convention.
	#[serde(default = "ChannelMap::default_hub_code")]
	pub hub_code: String,
	/// Per-country overrides.
	#[serde(default)]
	pub overrides: BTreeMap<CountryCode, ChannelPair>,
}

impl ChannelMap {
	fn default_hub_code() -> String {
		"DE".into()
	}

	pub fn channels_for(&self, country: &CountryCode) -> ChannelPair {
		self.overrides
			.get(country)
			.cloned()
			.unwrap_or_else(|| ChannelPair {
				export: format!("{}-{}", self.hub_code, country),
				import: format!("{}-{}", country, self.hub_code),
			})
	}
}

impl Default for ChannelMap {
	fn default() -> Self {
		Self {
			hub_code: Self::default_hub_code(),
			overrides: BTreeMap::new(),
		}
	}
}

/// Reduces one simulation run into a flow record.
///
/// Returns the record together with the countries that had to be left out
/// because one of their channels is missing from the run.
pub fn reduce_run(
	year: Year,
	run: &SimulationRun,
	countries: &[CountryCode],
	channels: &ChannelMap,
) -> (FlowRecord, Vec<CountryCode>) {
	let mut record = FlowRecord::new(year);
	let mut missing = Vec::new();

	for country in countries {
		let pair = channels.channels_for(country);
		let exports = run.clipped_total(&pair.export);
		let imports = run.clipped_total(&pair.import);
		let (Some(imports), Some(exports)) = (imports, exports) else {
			missing.push(country.clone());
			continue;
		};
		// Unvalidated runs can still overflow to infinity.
		match CountryFlow::new(imports * MWH_TO_TWH, exports * MWH_TO_TWH) {
			Ok(flow) => record.insert(country.clone(), flow),
			Err(e) => {
				warn!("{year}: dropping {country}: {e}");
				missing.push(country.clone());
			}
		}
	}

	(record, missing)
}

/// Where simulation runs are read from.
pub trait SimulationSource: Send + Sync {
	/// Reads the run for `year`.
	fn read(&self, year: Year) -> Result<SimulationRun, SourceError>;
}

/// Runs held in memory, typically parsed from JSON embedded in the page.
#[derive(Clone, Debug, Default)]
pub struct EmbeddedRuns {
	runs: BTreeMap<Year, SimulationRun>,
}

impl EmbeddedRuns {
	/// Parses `{ "<year>": { "channels": {...}, "weights": [...] } }`.
	pub fn from_json(json: &str) -> FlowResult<Self> {
		let raw: BTreeMap<String, SimulationRun> = serde_json::from_str(json)?;
		let mut runs = BTreeMap::new();
		for (key, run) in raw {
			let year: Year = key
				.trim()
				.parse()
				.map_err(|_| FlowError::Integrity(format!("year key '{key}' is not a year")))?;
			run.validate()
				.map_err(|e| FlowError::Integrity(format!("{year}: {e}")))?;
			runs.insert(year, run);
		}
		Ok(Self { runs })
	}

	/// Smallest range covering every embedded year.
	pub fn span(&self) -> Option<YearRange> {
		let first = *self.runs.keys().next()?;
		let last = *self.runs.keys().next_back()?;
		Some(YearRange {
			min: first,
			max: last,
		})
	}
}

impl SimulationSource for EmbeddedRuns {
	fn read(&self, year: Year) -> Result<SimulationRun, SourceError> {
		self.runs.get(&year).cloned().ok_or(SourceError::NotFound(year))
	}
}

/// Runs stored as `<dir>/<year>.json` files.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug)]
pub struct RunDirectory {
	dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl RunDirectory {
	/// Opens a run directory, failing if it does not exist.
	pub fn open(dir: impl Into<std::path::PathBuf>) -> FlowResult<Self> {
		let dir = dir.into();
		if !dir.is_dir() {
			return Err(FlowError::Io(std::io::Error::new(
				std::io::ErrorKind::NotFound,
				format!("simulation directory {} does not exist", dir.display()),
			)));
		}
		Ok(Self { dir })
	}
}

#[cfg(not(target_arch = "wasm32"))]
impl SimulationSource for RunDirectory {
	fn read(&self, year: Year) -> Result<SimulationRun, SourceError> {
		let path = self.dir.join(format!("{year}.json"));
		let text = match std::fs::read_to_string(&path) {
			Ok(text) => text,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
				return Err(SourceError::NotFound(year));
			}
			Err(e) => return Err(SourceError::Transient(format!("{}: {e}", path.display()))),
		};
		let run: SimulationRun = serde_json::from_str(&text)
			.map_err(|e| SourceError::Malformed(format!("{}: {e}", path.display())))?;
		run.validate()
			.map_err(|e| SourceError::Malformed(format!("{}: {e}", path.display())))?;
		Ok(run)
	}
}

/// Bounded retry for transient source failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
	/// Total read attempts, including the first one. Treated as at least 1.
	pub max_attempts: u32,
}

impl Default for RetryPolicy {
	fn default() -> Self {
		Self { max_attempts: 3 }
	}
}

/// Provider reducing a simulation run per requested year.
pub struct SimulationFlows<S> {
	source: S,
	countries: Vec<CountryCode>,
	years: YearRange,
	channels: ChannelMap,
	retry: RetryPolicy,
}

impl<S: SimulationSource> SimulationFlows<S> {
	pub fn new(
		source: S,
		countries: Vec<CountryCode>,
		years: YearRange,
		channels: ChannelMap,
		retry: RetryPolicy,
	) -> FlowResult<Self> {
		if countries.is_empty() {
			return Err(FlowError::Config("country list is empty".into()));
		}
		Ok(Self {
			source,
			countries,
			years,
			channels,
			retry,
		})
	}

	fn read_with_retry(&self, year: Year) -> FlowResult<SimulationRun> {
		let attempts = self.retry.max_attempts.max(1);
		let mut attempt = 1;
		loop {
			match self.source.read(year) {
				Ok(run) => return Ok(run),
				Err(e) if e.is_transient() && attempt < attempts => {
					warn!("{year}: read attempt {attempt}/{attempts} failed: {e}");
					attempt += 1;
				}
				Err(e) => {
					return Err(FlowError::DataNotFound {
						year,
						reason: e.to_string(),
					});
				}
			}
		}
	}
}

impl<S: SimulationSource> FlowProvider for SimulationFlows<S> {
	fn years(&self) -> YearRange {
		self.years
	}

	fn countries(&self) -> &[CountryCode] {
		&self.countries
	}

	fn flows(&self, year: Year) -> FlowResult<FlowRecord> {
		self.years.check(year)?;
		let run = self.read_with_retry(year)?;
		let (record, missing) = reduce_run(year, &run, &self.countries, &self.channels);
		if !missing.is_empty() {
			let names: Vec<&str> = missing.iter().map(CountryCode::as_str).collect();
			warn!("{year}: partial country data, omitting {}", names.join(", "));
		}
		debug!("{year}: reduced {} countries", record.len());
		Ok(record)
	}
}
