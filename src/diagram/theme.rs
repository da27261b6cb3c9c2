//! Colors for diagram nodes and links.
//!
//! Provides an RGBA color type with CSS formatting and parsing, and the
//! country → color table used to paint the Sankey nodes.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::flows::CountryCode;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

/// Neutral grey used for anything without a color of its own.
pub const FALLBACK_COLOR: Color = Color::rgb(128, 128, 128);

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self {
			a: a.clamp(0.0, 1.0),
			..self
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// Parses a CSS color string.
	/// Supports hex (`#RRGGBB`) and `rgb()`/`rgba()` functional notation.
	pub fn parse(color_str: &str) -> Option<Self> {
		let color_str = color_str.trim();
		if let Some(hex) = color_str.strip_prefix('#') {
			if hex.len() != 6 || !hex.is_ascii() {
				return None;
			}
			let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
			let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
			let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
			Some(Color::rgb(r, g, b))
		} else if color_str.starts_with("rgb") {
			let nums: Vec<&str> = color_str
				.trim_start_matches("rgba(")
				.trim_start_matches("rgb(")
				.trim_end_matches(')')
				.split(',')
				.collect();
			let r = nums.first()?.trim().parse().ok()?;
			let g = nums.get(1)?.trim().parse().ok()?;
			let b = nums.get(2)?.trim().parse().ok()?;
			let a = match nums.get(3) {
				Some(a) => a.trim().parse().ok()?,
				None => 1.0,
			};
			Some(Color::rgba(r, g, b, a))
		} else {
			None
		}
	}
}

/// Default node colors per neighbouring country.
pub fn default_country_colors() -> BTreeMap<CountryCode, String> {
	[
		("AT", "#e53935"),
		("BE", "#fdd835"),
		("CH", "#c62828"),
		("CZ", "#1e88e5"),
		("DK", "#ad1457"),
		("FR", "#3949ab"),
		("LU", "#4fc3f7"),
		("NL", "#fb8c00"),
		("NO", "#00897b"),
		("PL", "#d81b60"),
		("SE", "#fbc02d"),
	]
	.into_iter()
	.map(|(k, v)| (CountryCode::from(k), v.to_string()))
	.collect()
}

/// Node and link coloring.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ColorStyle {
	/// Country → CSS color. Replaces the default table when configured.
	pub countries: BTreeMap<CountryCode, String>,
	/// CSS color of the hub node.
	pub hub: String,
	/// Opacity applied to a country's color for its links.
	pub link_alpha: f64,
}

impl ColorStyle {
	/// Color for `country`. Unknown countries and unparsable entries get
	/// [`FALLBACK_COLOR`].
	pub fn resolve(&self, country: &CountryCode) -> Color {
		self.countries
			.get(country)
			.and_then(|css| Color::parse(css))
			.unwrap_or(FALLBACK_COLOR)
	}

	pub fn hub_color(&self) -> Color {
		Color::parse(&self.hub).unwrap_or(FALLBACK_COLOR)
	}
}

impl Default for ColorStyle {
	fn default() -> Self {
		Self {
			countries: default_country_colors(),
			hub: "#263238".into(),
			link_alpha: 0.4,
		}
	}
}
