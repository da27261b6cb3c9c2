//! Year selection → diagram state machine.
//!
//! The binding is either [`BindingState::Idle`], showing the view of the last
//! selected year, or [`BindingState::Recomputing`] while a selection is being
//! fetched and built. [`YearBinding::select`] runs both transitions at once.
//! Callers that fetch asynchronously use [`YearBinding::begin`] and
//! [`YearBinding::complete`]; only the most recent ticket may complete, so a
//! slow fetch can never overwrite a newer selection.

use std::sync::Arc;

use log::{debug, warn};

use crate::diagram::{self, DiagramSpec, StyleConfig};
use crate::flows::{FlowProvider, FlowRecord, FlowResult, Year};

/// What the chart area shows for a year.
#[derive(Clone, Debug, PartialEq)]
pub enum DiagramView {
	/// Nothing selected yet.
	Empty,
	Ready(DiagramSpec),
	/// The provider had no data; shown as a message instead of a chart.
	NoData { year: Year, message: String },
}

/// Identifies one selection request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket {
	year: Year,
	generation: u64,
}

impl Ticket {
	pub fn year(&self) -> Year {
		self.year
	}
}

#[derive(Clone, Debug, PartialEq)]
pub enum BindingState {
	Idle { year: Option<Year>, view: DiagramView },
	Recomputing { ticket: Ticket, previous: DiagramView },
}

/// Binds a year selector to a provider and the diagram builder.
pub struct YearBinding<P: ?Sized> {
	provider: Arc<P>,
	style: StyleConfig,
	state: BindingState,
	generation: u64,
}

impl<P: FlowProvider + ?Sized> YearBinding<P> {
	pub fn new(provider: Arc<P>, style: StyleConfig) -> Self {
		Self {
			provider,
			style,
			state: BindingState::Idle {
				year: None,
				view: DiagramView::Empty,
			},
			generation: 0,
		}
	}

	/// Initial selector value.
	pub fn default_year(&self) -> Year {
		self.provider.years().min
	}

	pub fn provider(&self) -> &P {
		&self.provider
	}

	pub fn state(&self) -> &BindingState {
		&self.state
	}

	/// The view currently on screen. While recomputing, the previous one.
	pub fn view(&self) -> &DiagramView {
		match &self.state {
			BindingState::Idle { view, .. } => view,
			BindingState::Recomputing { previous, .. } => previous,
		}
	}

	/// Selects `year`, fetches and builds synchronously, and returns the new view.
	pub fn select(&mut self, year: Year) -> &DiagramView {
		let ticket = self.begin(year);
		let result = self.provider.flows(year);
		self.complete(ticket, result);
		self.view()
	}

	/// Enters the recomputing state for `year`.
	pub fn begin(&mut self, year: Year) -> Ticket {
		self.generation += 1;
		let ticket = Ticket {
			year,
			generation: self.generation,
		};
		let previous = self.view().clone();
		self.state = BindingState::Recomputing { ticket, previous };
		debug!("recomputing diagram for {year}");
		ticket
	}

	/// Finishes the request identified by `ticket`.
	///
	/// Returns `false` and leaves the state untouched when a newer request has
	/// begun since.
	pub fn complete(&mut self, ticket: Ticket, result: FlowResult<FlowRecord>) -> bool {
		match &self.state {
			BindingState::Recomputing { ticket: current, .. } if *current == ticket => {}
			_ => {
				debug!("discarding stale result for {}", ticket.year);
				return false;
			}
		}

		let year = ticket.year;
		let view = match result {
			Ok(record) => DiagramView::Ready(diagram::build(
				year,
				&record,
				self.provider.countries(),
				&self.style,
			)),
			Err(e) => {
				warn!("{e}");
				DiagramView::NoData {
					year,
					message: format!("No data for {year}"),
				}
			}
		};
		self.state = BindingState::Idle {
			year: Some(year),
			view,
		};
		true
	}
}
