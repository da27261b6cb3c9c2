//! flow-sankey: Interactive Sankey dashboard of cross-border electricity flows.
//!
//! This crate turns per-year import/export records between a hub country and
//! its neighbours into Sankey diagrams, with a year slider selecting which
//! record is shown. Data comes from a precomputed table, reduced simulation
//! results or a seeded placeholder generator.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, error, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod binding;
pub mod components;
pub mod config;
pub mod diagram;
pub mod flows;

pub use binding::{DiagramView, YearBinding};
pub use components::dashboard::Dashboard;
pub use components::sankey::{Figure, SankeyChart};
pub use config::{AppConfig, DataDocuments};
pub use diagram::{DiagramLink, DiagramSpec, StyleConfig, build};
pub use flows::{CountryCode, FlowError, FlowProvider, FlowRecord, Year, YearRange};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("flow-sankey: logging initialized");
}

/// Text of the `<script>` element with the given id, if present.
fn script_text(id: &str) -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Reads configuration and data embedded in the page and builds the provider.
///
/// Expected elements: `dashboard-config` (optional), plus `flow-data` for the
/// static source or `simulation-runs` for the simulation source.
fn load_dashboard() -> Result<(AppConfig, Arc<dyn FlowProvider>), FlowError> {
	let config = match script_text("dashboard-config") {
		Some(json) => AppConfig::from_json(&json)?,
		None => {
			warn!("flow-sankey: no dashboard-config element, using defaults");
			AppConfig::default()
		}
	};
	let flow_table = script_text("flow-data");
	let simulation_runs = script_text("simulation-runs");
	let provider = config.provider(DataDocuments {
		flow_table: flow_table.as_deref(),
		simulation_runs: simulation_runs.as_deref(),
	})?;
	Ok((config, provider))
}

/// Main application component.
/// Loads flow data from the DOM and renders the dashboard, or an error panel
/// when the data cannot be loaded.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let content = match load_dashboard() {
		Ok((config, provider)) => {
			let heading = config.heading(provider.years());
			view! { <Dashboard provider=provider style=config.style heading=heading /> }.into_any()
		}
		Err(e) => {
			error!("flow-sankey: failed to load flow data: {}", e);
			view! {
				<div class="load-error">
					<h1>"Unable to load flow data"</h1>
					<p>{e.to_string()}</p>
				</div>
			}
			.into_any()
		}
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />
		<Title text="Cross-Border Energy Flows" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<main class="flow-dashboard">{content}</main>
	}
}
