//! Seeded placeholder flows for demonstrating the dashboard without real data.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
	CountryCode, CountryFlow, FlowError, FlowProvider, FlowRecord, FlowResult, Year, YearRange,
};

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 42;

/// Generates integer flows uniformly in `low..=high` per year, country and
/// direction.
///
/// Every call reseeds from `seed` and the year, so the same configuration
/// always yields the same numbers. Draw order is the country order, imports
/// before exports.
#[derive(Clone, Debug)]
pub struct SyntheticFlows {
	countries: Vec<CountryCode>,
	years: YearRange,
	seed: u64,
	low: u32,
	high: u32,
}

impl SyntheticFlows {
	pub fn new(
		countries: Vec<CountryCode>,
		years: YearRange,
		seed: u64,
		low: u32,
		high: u32,
	) -> FlowResult<Self> {
		if low > high {
			return Err(FlowError::Config(format!(
				"synthetic bounds are empty: {low} > {high}"
			)));
		}
		Ok(Self {
			countries,
			years,
			seed,
			low,
			high,
		})
	}

	/// Generator with the default `[500, 5000]` bounds and [`DEFAULT_SEED`].
	pub fn with_defaults(countries: Vec<CountryCode>, years: YearRange) -> Self {
		Self {
			countries,
			years,
			seed: DEFAULT_SEED,
			low: 500,
			high: 5000,
		}
	}

	fn rng_for(&self, year: Year) -> StdRng {
		StdRng::seed_from_u64(self.seed ^ u64::from(year).wrapping_mul(0x9E37_79B9_7F4A_7C15))
	}
}

impl FlowProvider for SyntheticFlows {
	fn years(&self) -> YearRange {
		self.years
	}

	fn countries(&self) -> &[CountryCode] {
		&self.countries
	}

	fn flows(&self, year: Year) -> FlowResult<FlowRecord> {
		self.years.check(year)?;
		let mut rng = self.rng_for(year);
		let mut record = FlowRecord::new(year);
		for country in &self.countries {
			let imports = rng.gen_range(self.low..=self.high);
			let exports = rng.gen_range(self.low..=self.high);
			record.insert(
				country.clone(),
				CountryFlow::new(f64::from(imports), f64::from(exports))?,
			);
		}
		Ok(record)
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::flows::default_countries;

	#[test]
	fn same_seed_is_bit_identical() {
		let a = SyntheticFlows::with_defaults(default_countries(), YearRange::default());
		let b = SyntheticFlows::with_defaults(default_countries(), YearRange::default());
		for year in YearRange::default().iter() {
			let (ra, rb) = (a.flows(year).unwrap(), b.flows(year).unwrap());
			for (fa, fb) in ra.flows.values().zip(rb.flows.values()) {
				assert_eq!(fa.imports.to_bits(), fb.imports.to_bits());
				assert_eq!(fa.exports.to_bits(), fb.exports.to_bits());
			}
			assert_eq!(ra, rb);
		}
	}

	#[test]
	fn repeated_calls_do_not_drift() {
		let flows = SyntheticFlows::with_defaults(default_countries(), YearRange::default());
		assert_eq!(flows.flows(2025).unwrap(), flows.flows(2025).unwrap());
	}

	#[test]
	fn values_are_integers_within_bounds() {
		let flows = SyntheticFlows::with_defaults(default_countries(), YearRange::default());
		let record = flows.flows(2020).unwrap();
		assert_eq!(record.len(), default_countries().len());
		for flow in record.flows.values() {
			for value in [flow.imports, flow.exports] {
				assert!((500.0..=5000.0).contains(&value));
				assert_eq!(value.fract(), 0.0);
			}
		}
	}

	#[test]
	fn years_differ_and_seeds_differ() {
		let base = SyntheticFlows::with_defaults(default_countries(), YearRange::default());
		let other = SyntheticFlows::new(default_countries(), YearRange::default(), 7, 500, 5000).unwrap();
		assert_ne!(base.flows(2020).unwrap().flows, base.flows(2021).unwrap().flows);
		assert_ne!(base.flows(2020).unwrap().flows, other.flows(2020).unwrap().flows);
	}

	#[test]
	fn rejects_inverted_bounds_and_foreign_years() {
		assert!(SyntheticFlows::new(default_countries(), YearRange::default(), 1, 10, 5).is_err());
		let flows = SyntheticFlows::with_defaults(default_countries(), YearRange::default());
		assert!(matches!(flows.flows(2031), Err(FlowError::DataNotFound { .. })));
	}
}
