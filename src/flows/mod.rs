//! Per-year cross-border flow records and the providers that supply them.
//!
//! A [`FlowProvider`] answers one question: how much energy did the hub import
//! from and export to each neighbouring country in a given year. Three
//! strategies implement it:
//!
//! - [`StaticFlowTable`]: a precomputed year → country → {imports, exports} table
//! - [`SimulationFlows`]: reduces power-flow simulation time series per year
//! - [`SyntheticFlows`]: seeded placeholder values for demonstration
//!
//! Providers are built once and only read afterwards. To pick up new data,
//! construct a new provider.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

mod error;
mod simulation;
mod synthetic;
mod table;

pub use error::{FlowError, FlowResult, SourceError};
#[cfg(not(target_arch = "wasm32"))]
pub use simulation::RunDirectory;
pub use simulation::{
	ChannelMap, ChannelPair, EmbeddedRuns, MWH_TO_TWH, RetryPolicy, SimulationFlows,
	SimulationRun, SimulationSource, reduce_run,
};
pub use synthetic::{DEFAULT_SEED, SyntheticFlows};
pub use table::StaticFlowTable;

/// Calendar year used as the lookup key into a provider.
pub type Year = u16;

/// Inclusive range of years a provider serves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
	pub min: Year,
	pub max: Year,
}

impl YearRange {
	/// Creates a range, rejecting `min > max`.
	pub fn new(min: Year, max: Year) -> FlowResult<Self> {
		if min > max {
			return Err(FlowError::Config(format!(
				"year range is empty: {min} > {max}"
			)));
		}
		Ok(Self { min, max })
	}

	pub fn contains(&self, year: Year) -> bool {
		(self.min..=self.max).contains(&year)
	}

	/// Returns `year` if it lies in the range, otherwise [`FlowError::DataNotFound`].
	pub fn check(&self, year: Year) -> FlowResult<Year> {
		if self.contains(year) {
			Ok(year)
		} else {
			Err(FlowError::DataNotFound {
				year,
				reason: format!("outside {}..={}", self.min, self.max),
			})
		}
	}

	pub fn iter(&self) -> RangeInclusive<Year> {
		self.min..=self.max
	}
}

impl Default for YearRange {
	fn default() -> Self {
		Self {
			min: 2020,
			max: 2030,
		}
	}
}

/// Short identifier of a neighbouring country, e.g. `"FR"`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryCode(String);

impl CountryCode {
	pub fn new(code: impl Into<String>) -> Self {
		Self(code.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for CountryCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl Borrow<str> for CountryCode {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl From<&str> for CountryCode {
	fn from(code: &str) -> Self {
		Self::new(code)
	}
}

/// The neighbours shown by default, in display order.
pub fn default_countries() -> Vec<CountryCode> {
	["AT", "BE", "CH", "CZ", "DK", "FR", "LU", "NL", "NO", "PL", "SE"]
		.into_iter()
		.map(CountryCode::from)
		.collect()
}

/// Energy exchanged with one country over a year, in the reporting unit (TWh).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CountryFlow {
	/// Energy flowing from the country into the hub.
	pub imports: f64,
	/// Energy flowing from the hub into the country.
	pub exports: f64,
}

impl CountryFlow {
	/// Validates that both quantities are finite and non-negative.
	pub fn new(imports: f64, exports: f64) -> FlowResult<Self> {
		for (direction, value) in [("imports", imports), ("exports", exports)] {
			if !value.is_finite() || value < 0.0 {
				return Err(FlowError::Integrity(format!(
					"{direction} must be a non-negative number, got {value}"
				)));
			}
		}
		Ok(Self { imports, exports })
	}
}

/// All known country flows for one year.
///
/// A country appears only when both of its directions are known, so consumers
/// never see half an entry. Coverage may be partial: countries can be missing.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FlowRecord {
	pub year: Year,
	pub flows: BTreeMap<CountryCode, CountryFlow>,
}

impl FlowRecord {
	pub fn new(year: Year) -> Self {
		Self {
			year,
			flows: BTreeMap::new(),
		}
	}

	pub fn insert(&mut self, country: CountryCode, flow: CountryFlow) {
		self.flows.insert(country, flow);
	}

	pub fn get(&self, country: &str) -> Option<&CountryFlow> {
		self.flows.get(country)
	}

	pub fn len(&self) -> usize {
		self.flows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.flows.is_empty()
	}
}

/// Source of per-year flow records.
pub trait FlowProvider: Send + Sync {
	/// Years this provider can answer for.
	fn years(&self) -> YearRange;

	/// The fixed, ordered country list.
	fn countries(&self) -> &[CountryCode];

	/// Flow record for `year`.
	///
	/// Fails with [`FlowError::DataNotFound`] for years outside [`Self::years`]
	/// or when the backing data has nothing for that year.
	fn flows(&self, year: Year) -> FlowResult<FlowRecord>;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn year_range_boundaries_are_inclusive() {
		let range = YearRange::new(2020, 2030).unwrap();
		assert_eq!(range.check(2020).unwrap(), 2020);
		assert_eq!(range.check(2030).unwrap(), 2030);
		assert!(matches!(
			range.check(2019),
			Err(FlowError::DataNotFound { year: 2019, .. })
		));
		assert!(matches!(
			range.check(2031),
			Err(FlowError::DataNotFound { year: 2031, .. })
		));
	}

	#[test]
	fn empty_year_range_is_rejected() {
		assert!(matches!(
			YearRange::new(2030, 2020),
			Err(FlowError::Config(_))
		));
	}

	#[test]
	fn country_flow_rejects_negative_and_nan() {
		assert!(CountryFlow::new(0.0, 0.0).is_ok());
		assert!(CountryFlow::new(-0.1, 1.0).is_err());
		assert!(CountryFlow::new(1.0, f64::NAN).is_err());
		assert!(CountryFlow::new(f64::INFINITY, 1.0).is_err());
	}

	#[test]
	fn record_lookup_by_str() {
		let mut record = FlowRecord::new(2024);
		record.insert("FR".into(), CountryFlow::new(10.5, 3.2).unwrap());
		assert_eq!(record.get("FR").map(|f| f.imports), Some(10.5));
		assert!(record.get("NO").is_none());
		assert_eq!(record.len(), 1);
	}
}
