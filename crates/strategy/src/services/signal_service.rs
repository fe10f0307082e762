use std::sync::Arc;

use common::models::{Instrument, Quote, Signal, SignalRecord, Timeframe};
use market_data::{GridFetcher, QuoteGrid};
use tracing::{Instrument as _, error, info, info_span, warn};
use uuid::Uuid;

use crate::features::FeatureVector;
use crate::inference::{Classifier, InferenceError, classify};
use crate::interpreter::interpret;
use crate::risk;

/// Quote grid → features → classifier → signal and risk → ordered records.
///
/// Holds only read-only state, so one instance serves concurrent requests.
pub struct SignalService {
    fetcher: GridFetcher,
    classifier: Option<Arc<dyn Classifier>>,
}

impl SignalService {
    pub fn new(fetcher: GridFetcher, classifier: Option<Arc<dyn Classifier>>) -> Self {
        if classifier.is_none() {
            warn!("No classifier loaded. Every signal will be Unknown without confidence.");
        }

        Self {
            fetcher,
            classifier,
        }
    }

    pub fn has_classifier(&self) -> bool {
        self.classifier.is_some()
    }

    /// Fetches a fresh grid and turns it into records. Never fails: cells
    /// that cannot be processed are simply left out.
    pub async fn generate_signals(&self) -> Vec<SignalRecord> {
        let span = info_span!("generate_signals", request_id = %Uuid::new_v4());

        async {
            let grid = self.fetcher.fetch_grid().await;
            let records = self.assemble(&grid);
            info!(
                "Generated {} signals from {}/{} quote cells",
                records.len(),
                grid.present_count(),
                grid.cell_count()
            );
            records
        }
        .instrument(span)
        .await
    }

    /// One record per present cell, in the grid's iteration order.
    pub fn assemble(&self, grid: &QuoteGrid) -> Vec<SignalRecord> {
        grid.cells()
            .filter_map(|(instrument, timeframe, quote)| {
                self.process_cell(instrument, timeframe, quote?)
            })
            .collect()
    }

    fn process_cell(
        &self,
        instrument: &Instrument,
        timeframe: &Timeframe,
        quote: &Quote,
    ) -> Option<SignalRecord> {
        let signal = match self.classifier.as_deref() {
            Some(classifier) => self.predict(classifier, instrument, timeframe, quote)?,
            None => interpret(None),
        };

        let risk = risk::compute(signal.direction, quote.close());

        Some(SignalRecord::new(
            instrument.clone(),
            timeframe.clone(),
            quote,
            signal,
            risk,
        ))
    }

    fn predict(
        &self,
        classifier: &dyn Classifier,
        instrument: &Instrument,
        timeframe: &Timeframe,
        quote: &Quote,
    ) -> Option<Signal> {
        let features = FeatureVector::from_quote(quote);

        match classify(classifier, &features) {
            Ok(output) => Some(interpret(Some(&output))),
            Err(InferenceError::ShapeMismatch { expected, actual }) => {
                error!(
                    "Feature/model skew for {} {}: classifier expects {} inputs, feature builder produced {}",
                    instrument, timeframe, expected, actual
                );
                None
            }
            Err(e) => {
                error!("Inference failed for {} {}: {}", instrument, timeframe, e);
                None
            }
        }
    }
}
