//! Leptos component hosting a Plotly Sankey chart.
//!
//! The component renders an empty container and redraws it through
//! `Plotly.react` whenever the `figure` signal changes. A `None` figure clears
//! the container.

use leptos::prelude::*;
use log::warn;
use web_sys::HtmlElement;

use super::figure::Figure;
use super::plotly;

/// Renders `figure` as a Sankey diagram.
#[component]
pub fn SankeyChart(
	#[prop(into)] figure: Signal<Option<Figure>>,
	#[prop(default = 600.0)] height: f64,
) -> impl IntoView {
	let chart_ref = NodeRef::<leptos::html::Div>::new();

	Effect::new(move |_| {
		let figure = figure.get();
		let Some(element) = chart_ref.get() else {
			return;
		};
		let element: HtmlElement = element.into();
		let drawn = match &figure {
			Some(figure) => plotly::react(&element, figure),
			None => plotly::purge(&element),
		};
		if let Err(e) = drawn {
			warn!("flow-sankey: failed to draw chart: {:?}", e);
		}
	});

	view! {
		<div
			node_ref=chart_ref
			class="sankey-chart"
			style=format!("width: 100%; height: {height}px;")
		/>
	}
}
