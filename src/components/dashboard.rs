//! Year slider wired to the Sankey chart.

use std::sync::Arc;

use leptos::prelude::*;
use log::debug;

use super::sankey::{Figure, SankeyChart};
use crate::binding::{DiagramView, YearBinding};
use crate::diagram::StyleConfig;
use crate::flows::{FlowProvider, Year};

/// Heading, year slider with one mark per year, and the flow chart.
///
/// The slider starts at the provider's first year. Each change runs the
/// binding synchronously and replaces the chart, or shows a "no data" notice.
#[component]
pub fn Dashboard(
	provider: Arc<dyn FlowProvider>,
	style: StyleConfig,
	#[prop(into)] heading: String,
) -> impl IntoView {
	let years = provider.years();
	let layout = style.layout.clone();
	let binding = StoredValue::new(YearBinding::new(provider, style));

	let (year, set_year) = signal(years.min);
	let diagram = RwSignal::new(DiagramView::Empty);

	let select = move |selected: Year| {
		set_year.set(selected);
		binding.update_value(|b| diagram.set(b.select(selected).clone()));
	};
	select(years.min);

	let figure = Signal::derive(move || match diagram.get() {
		DiagramView::Ready(spec) => Some(Figure::from_spec(&spec, &layout)),
		_ => None,
	});
	let notice = move || match diagram.get() {
		DiagramView::NoData { message, .. } => Some(view! { <p class="no-data">{message}</p> }),
		_ => None,
	};

	let on_input = move |ev: web_sys::Event| match event_target_value(&ev).parse::<Year>() {
		Ok(selected) => select(selected),
		Err(e) => debug!("flow-sankey: ignoring slider value: {e}"),
	};

	let marks = years
		.iter()
		.map(|y| view! { <option value=y.to_string() label=y.to_string()></option> })
		.collect_view();

	view! {
		<section class="dashboard">
			<h1>{heading}</h1>
			<label for="year-slider">"Select Year: " {move || year.get().to_string()}</label>
			<input
				id="year-slider"
				type="range"
				min=years.min.to_string()
				max=years.max.to_string()
				step="1"
				list="year-marks"
				prop:value=move || year.get().to_string()
				on:input=on_input
			/>
			<datalist id="year-marks">{marks}</datalist>
			{notice}
			<SankeyChart figure=figure />
		</section>
	}
}
