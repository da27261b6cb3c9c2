//! Precomputed year → country → {imports, exports} lookup table.

use std::collections::BTreeMap;

use log::{info, warn};
use serde::Deserialize;

use super::{
	CountryCode, CountryFlow, FlowError, FlowProvider, FlowRecord, FlowResult, Year, YearRange,
};

/// One year of the table as it appears on disk.
#[derive(Debug, Deserialize)]
struct RawYear {
	imports: BTreeMap<CountryCode, f64>,
	exports: BTreeMap<CountryCode, f64>,
}

/// Provider backed by a table that is parsed and validated once.
///
/// The JSON layout is keyed by year strings:
///
/// ```json
/// { "2020": { "imports": { "FR": 12.1 }, "exports": { "FR": 4.0 } } }
/// ```
///
/// Every country of the fixed list must have both directions for every year in
/// the table. A missing entry is a load error, never a silent zero.
#[derive(Clone, Debug)]
pub struct StaticFlowTable {
	countries: Vec<CountryCode>,
	years: YearRange,
	records: BTreeMap<Year, FlowRecord>,
}

impl StaticFlowTable {
	/// Parses and validates a table.
	///
	/// When `countries` is `None` the list is taken from the first year's import
	/// keys. When `years` is `None` the range spans the table's first and last
	/// year.
	pub fn from_json(
		json: &str,
		countries: Option<Vec<CountryCode>>,
		years: Option<YearRange>,
	) -> FlowResult<Self> {
		let raw: BTreeMap<String, RawYear> = serde_json::from_str(json)?;

		let mut parsed = BTreeMap::new();
		for (key, year) in raw {
			let year_number: Year = key
				.trim()
				.parse()
				.map_err(|_| FlowError::Integrity(format!("year key '{key}' is not a year")))?;
			parsed.insert(year_number, year);
		}

		let (Some(&first), Some(&last)) = (parsed.keys().next(), parsed.keys().next_back()) else {
			return Err(FlowError::Integrity("flow table has no years".into()));
		};

		let countries = match countries {
			Some(list) => list,
			None => {
				warn!("no country list configured, using the countries of {first}");
				parsed[&first].imports.keys().cloned().collect()
			}
		};
		if countries.is_empty() {
			return Err(FlowError::Config("country list is empty".into()));
		}

		let years = match years {
			Some(range) => range,
			None => YearRange::new(first, last)?,
		};

		let mut records = BTreeMap::new();
		for (year, raw_year) in parsed {
			let mut record = FlowRecord::new(year);
			for country in &countries {
				let imports = raw_year.imports.get(country).copied();
				let exports = raw_year.exports.get(country).copied();
				let (Some(imports), Some(exports)) = (imports, exports) else {
					return Err(FlowError::Integrity(format!(
						"{year}: {country} is missing its {}",
						if imports.is_none() { "imports" } else { "exports" }
					)));
				};
				let flow = CountryFlow::new(imports, exports)
					.map_err(|e| FlowError::Integrity(format!("{year}: {country}: {e}")))?;
				record.insert(country.clone(), flow);
			}
			records.insert(year, record);
		}

		info!(
			"loaded flow table: {} years, {} countries",
			records.len(),
			countries.len()
		);

		Ok(Self {
			countries,
			years,
			records,
		})
	}
}

impl FlowProvider for StaticFlowTable {
	fn years(&self) -> YearRange {
		self.years
	}

	fn countries(&self) -> &[CountryCode] {
		&self.countries
	}

	fn flows(&self, year: Year) -> FlowResult<FlowRecord> {
		self.years.check(year)?;
		self.records
			.get(&year)
			.cloned()
			.ok_or_else(|| FlowError::DataNotFound {
				year,
				reason: "year missing from flow table".into(),
			})
	}
}
