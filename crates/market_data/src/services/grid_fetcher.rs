use std::sync::Arc;
use std::time::Duration;

use common::models::{Instrument, Timeframe};
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::grid::{GridCell, GridRow, QuoteGrid};
use crate::traits::QuoteSource;

/// Walks every configured (instrument, timeframe) pair once, sequentially.
///
/// A failed cell is recorded as absent and the walk carries on. The optional
/// delay between calls keeps the provider under its rate limit.
pub struct GridFetcher {
    source: Arc<dyn QuoteSource>,
    instruments: Vec<Instrument>,
    timeframes: Vec<Timeframe>,
    request_delay: Duration,
}

impl GridFetcher {
    pub fn new(
        source: Arc<dyn QuoteSource>,
        instruments: Vec<Instrument>,
        timeframes: Vec<Timeframe>,
    ) -> Self {
        Self {
            source,
            instruments,
            timeframes,
            request_delay: Duration::ZERO,
        }
    }

    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    pub fn cell_count(&self) -> usize {
        self.instruments.len() * self.timeframes.len()
    }

    pub async fn fetch_grid(&self) -> QuoteGrid {
        let mut grid = QuoteGrid::with_capacity(self.instruments.len());
        let mut calls = 0_usize;

        for instrument in &self.instruments {
            let mut cells = Vec::with_capacity(self.timeframes.len());

            for timeframe in &self.timeframes {
                if calls > 0 && !self.request_delay.is_zero() {
                    sleep(self.request_delay).await;
                }
                calls += 1;

                let quote = match self.source.fetch(instrument, timeframe).await {
                    Ok(quote) => Some(quote),
                    Err(e) => {
                        warn!("Error fetching {} at {}: {}", instrument, timeframe, e);
                        None
                    }
                };

                cells.push(GridCell {
                    timeframe: timeframe.clone(),
                    quote,
                });
            }

            grid.push_row(GridRow {
                instrument: instrument.clone(),
                cells,
            });
        }

        debug!(
            "Fetched {}/{} quote cells",
            grid.present_count(),
            grid.cell_count()
        );
        grid
    }
}
