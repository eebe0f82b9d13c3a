use tracing::{debug, warn};

use crate::core::{Entry, ExtraStore, RangeProvider, Series};
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    /// Replaces the whole data model.
    pub fn set_series(&mut self, series: Vec<Series>) {
        debug!(series_count = series.len(), "series replaced");
        self.series = series;
        self.mark_data_changed();
    }

    /// Replaces the data model and its host-supplied extras together.
    pub fn set_series_with_extras(&mut self, series: Vec<Series>, extra_store: ExtraStore) {
        self.extra_store = extra_store;
        self.set_series(series);
    }

    /// Appends one entry to an existing series.
    ///
    /// Entries must keep x non-decreasing within a series.
    pub fn append_entry(&mut self, series_index: usize, entry: Entry) -> ChartResult<()> {
        if !entry.is_finite() {
            return Err(ChartError::InvalidData(
                "appended entry must have finite x and y".to_owned(),
            ));
        }
        let Some(series) = self.series.get_mut(series_index) else {
            return Err(ChartError::InvalidData(format!(
                "series index {series_index} out of bounds"
            )));
        };
        if let Some(last) = series.entries.last() {
            if entry.x < last.x {
                warn!(x = entry.x, last_x = last.x, "rejected out-of-order entry");
                return Err(ChartError::InvalidData(
                    "appended entry x must not precede the last entry".to_owned(),
                ));
            }
        }
        series.entries.push(entry);
        self.mark_data_changed();
        Ok(())
    }

    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    #[must_use]
    pub fn extra_store(&self) -> &ExtraStore {
        &self.extra_store
    }

    pub fn set_extra_store(&mut self, extra_store: ExtraStore) {
        self.extra_store = extra_store;
        self.needs_measure = true;
    }

    /// Folds `extra_store` over the current extras; incoming keys win.
    pub fn merge_extra_store(&mut self, extra_store: &ExtraStore) {
        self.extra_store = self.extra_store.merge(extra_store);
        self.needs_measure = true;
    }

    pub fn set_range_provider(&mut self, provider: impl RangeProvider + 'static) {
        self.range_provider = Box::new(provider);
        self.needs_measure = true;
    }

    fn mark_data_changed(&mut self) {
        self.data_changed = true;
        self.needs_measure = true;
    }
}
