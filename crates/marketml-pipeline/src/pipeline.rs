//! The orchestrator joining all pipeline stages.

use std::collections::BTreeMap;

use marketml_core::config::PipelineConfig;
use marketml_core::error::{MarketMlError, MarketMlResult};
use marketml_core::types::{BarSeries, SentimentTable, SignalRow};
use marketml_features::{
    validity, DropReason, DroppedRow, FeatureAssembler, FeatureRow, LabelGenerator, LabeledSample,
};
use marketml_indicators::{IndicatorEngine, IndicatorRow};
use marketml_signals::SignalGenerator;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// The labeled training product for one instrument.
///
/// `dropped` is the audit trail of every bar that did not become a
/// sample, with the reason. Serialize-only, matching the audit types.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingTable {
    pub symbol: String,
    pub samples: Vec<LabeledSample>,
    pub dropped: Vec<DroppedRow>,
}

/// The live inference product: the most recent bar's signals and,
/// once warm-up allows, its feature row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveSnapshot {
    pub symbol: String,
    /// Source bar timestamp (Unix ms)
    pub timestamp: i64,
    pub signal: SignalRow,
    pub indicators: IndicatorRow,
    /// None while indicator warm-up leaves the row incomplete
    pub features: Option<FeatureRow>,
}

/// Batch transform from raw bars to the two data products.
///
/// All stages are pure; independent instruments share no state.
#[derive(Debug, Clone)]
pub struct Pipeline {
    engine: IndicatorEngine,
    signals: SignalGenerator,
    assembler: FeatureAssembler,
    labels: LabelGenerator,
}

impl Pipeline {
    /// Create a pipeline, validating the configuration up front.
    pub fn new(config: PipelineConfig) -> MarketMlResult<Self> {
        config.validate()?;
        let labels = LabelGenerator::new(&config.label);
        Ok(Self {
            engine: IndicatorEngine::new(config.indicators),
            signals: SignalGenerator::new(),
            assembler: FeatureAssembler::new(),
            labels,
        })
    }

    /// Build the labeled training table for one instrument.
    ///
    /// Bars whose labeling horizon extends past the end of the series,
    /// and bars with undefined required features (the indicator warm-up
    /// head included), are recorded in `dropped` rather than emitted.
    pub fn training_table(
        &self,
        series: &BarSeries,
        sentiment: Option<&SentimentTable>,
    ) -> MarketMlResult<TrainingTable> {
        series.validate()?;

        let closes = series.closes();
        let table = self.engine.compute(series)?;
        let signal_rows = self.signals.generate(&table, &closes);
        let candidates = self.assembler.assemble(series, &table, &signal_rows, sentiment);
        let labels = self.labels.compute(&closes);

        let mut samples = Vec::with_capacity(labels.len());
        let mut dropped = Vec::new();

        for (index, candidate) in candidates.iter().enumerate() {
            let Some(label) = labels.get(index) else {
                dropped.push(DroppedRow {
                    index,
                    timestamp: candidate.timestamp,
                    reason: DropReason::UnobservableLabel,
                });
                continue;
            };
            match validity::check(candidate) {
                Ok(features) => samples.push(LabeledSample {
                    features,
                    future_return: label.future_return,
                    target: label.target,
                }),
                Err(reason) => {
                    debug!(symbol = %series.symbol, index, ?reason, "dropping feature row");
                    dropped.push(DroppedRow {
                        index,
                        timestamp: candidate.timestamp,
                        reason,
                    });
                }
            }
        }

        info!(
            symbol = %series.symbol,
            bars = series.len(),
            samples = samples.len(),
            dropped = dropped.len(),
            "built training table"
        );

        Ok(TrainingTable {
            symbol: series.symbol.clone(),
            samples,
            dropped,
        })
    }

    /// Compute the live snapshot for the most recent bar, without labels.
    pub fn live_snapshot(
        &self,
        series: &BarSeries,
        sentiment: Option<&SentimentTable>,
    ) -> MarketMlResult<LiveSnapshot> {
        series.validate()?;

        let closes = series.closes();
        let table = self.engine.compute(series)?;
        let signal_rows = self.signals.generate(&table, &closes);
        let candidates = self.assembler.assemble(series, &table, &signal_rows, sentiment);

        let last = series.len() - 1;
        let signal = signal_rows[last];
        let indicators = table
            .row(last)
            .ok_or_else(|| MarketMlError::Internal("indicator table misaligned".into()))?;

        let features = validity::check(&candidates[last]).ok();

        Ok(LiveSnapshot {
            symbol: series.symbol.clone(),
            timestamp: signal.timestamp,
            signal,
            indicators,
            features,
        })
    }

    /// Build training tables for a whole universe of instruments.
    ///
    /// Instruments are independent and share no state; a malformed
    /// series fails the batch with its own error.
    pub fn training_tables(
        &self,
        universe: &BTreeMap<String, BarSeries>,
        sentiment: &BTreeMap<String, SentimentTable>,
    ) -> MarketMlResult<BTreeMap<String, TrainingTable>> {
        let mut tables = BTreeMap::new();
        for (symbol, series) in universe {
            let table = self.training_table(series, sentiment.get(symbol))?;
            tables.insert(symbol.clone(), table);
        }
        Ok(tables)
    }
}
