//! Session coordinator.
//!
//! Owns the load lifecycle, the predicate cell, and the view state. Every
//! predicate write recomputes the filtered collection before returning, so
//! any view read afterwards sees the new result.

use bizpulse_common::BusinessRecord;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::FetchError;
use crate::filter::{FilterPredicate, ZipSelector};
use crate::selection::{Surface, ViewState};
use crate::views::{self, DetailView, FilterOptions, ListView, MapView, StatsView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusView {
    pub status: LoadStatus,
    pub record_count: usize,
    pub notice: Option<String>,
    pub surface: Surface,
    pub selected: Option<String>,
    pub stats_open: bool,
}

#[derive(Debug)]
pub struct Session {
    status: LoadStatus,
    catalog: Catalog,
    zip_codes: Vec<String>,
    predicate: FilterPredicate,
    /// Indices into the catalog matching `predicate`, in catalog order.
    filtered: Vec<usize>,
    view: ViewState,
    stats_open: bool,
    notice: Option<String>,
}

impl Session {
    /// A session waiting on its one fetch. `zip_codes` are the areas offered
    /// by the filter bar.
    pub fn new(zip_codes: Vec<String>) -> Self {
        Self {
            status: LoadStatus::Loading,
            catalog: Catalog::empty(),
            zip_codes,
            predicate: FilterPredicate::match_all(),
            filtered: Vec::new(),
            view: ViewState::new(),
            stats_open: false,
            notice: None,
        }
    }

    /// Apply the fetch outcome. Only the first completion counts; the
    /// collection is immutable for the rest of the session.
    pub fn complete_load(&mut self, result: Result<Vec<BusinessRecord>, FetchError>) {
        if self.status != LoadStatus::Loading {
            tracing::warn!(status = ?self.status, "Ignoring second load completion");
            return;
        }
        match result {
            Ok(records) => {
                self.catalog = Catalog::new(records);
                self.status = LoadStatus::Ready;
                tracing::info!(count = self.catalog.len(), "Session ready");
            }
            Err(err) => {
                tracing::warn!(error = %err, "Session load failed");
                self.catalog = Catalog::empty();
                self.status = LoadStatus::Failed;
                self.notice = Some(err.user_message().to_string());
            }
        }
        self.view.revalidate(&self.catalog);
        self.refilter();
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn predicate(&self) -> &FilterPredicate {
        &self.predicate
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn stats_open(&self) -> bool {
        self.stats_open
    }

    // --- Predicate cell ---

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.predicate.search = search.into();
        self.refilter();
    }

    pub fn set_zip(&mut self, zip: ZipSelector) {
        self.predicate.zip = zip;
        self.refilter();
    }

    pub fn set_predicate(&mut self, predicate: FilterPredicate) {
        self.predicate = predicate;
        self.refilter();
    }

    pub fn reset_filters(&mut self) {
        self.set_predicate(FilterPredicate::match_all());
    }

    fn refilter(&mut self) {
        let matcher = self.predicate.matcher();
        self.filtered = self
            .catalog
            .entries()
            .enumerate()
            .filter(|(_, (record, keys))| matcher.matches_keyed(record, keys))
            .map(|(i, _)| i)
            .collect();
        tracing::debug!(
            search = %self.predicate.search,
            zip = %self.predicate.zip,
            matched = self.filtered.len(),
            "Recomputed filtered collection"
        );
    }

    /// The filtered collection, in catalog order.
    pub fn filtered(&self) -> Vec<&BusinessRecord> {
        let records = self.catalog.records();
        self.filtered.iter().map(|&i| &records[i]).collect()
    }

    // --- Selection / surfaces ---

    pub fn select(&mut self, key: &str) {
        self.view.select(key, &self.catalog);
    }

    pub fn dismiss_selection(&mut self) {
        self.view.dismiss();
    }

    pub fn set_surface(&mut self, surface: Surface) {
        self.view.set_surface(surface);
    }

    pub fn toggle_surface(&mut self) {
        self.view.set_surface(self.view.surface().toggled());
    }

    pub fn toggle_stats(&mut self) {
        self.stats_open = !self.stats_open;
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn selected_record(&self) -> Option<&BusinessRecord> {
        self.view.selected_key().and_then(|k| self.catalog.get(k))
    }

    // --- Views ---

    pub fn status_view(&self) -> StatusView {
        StatusView {
            status: self.status,
            record_count: self.catalog.len(),
            notice: self.notice.clone(),
            surface: self.view.surface(),
            selected: self.view.selected_key().map(String::from),
            stats_open: self.stats_open,
        }
    }

    pub fn list_view(&self) -> ListView {
        views::list_view(
            &self.filtered(),
            self.view.selected_key(),
            self.status,
            self.view.surface(),
        )
    }

    pub fn map_view(&self) -> MapView {
        views::map_view(&self.filtered(), self.view.selected_key())
    }

    pub fn stats_view(&self) -> StatsView {
        views::stats_view(&self.filtered())
    }

    pub fn detail_view(&self) -> Option<DetailView> {
        self.selected_record().map(views::detail_view)
    }

    pub fn filter_options(&self) -> FilterOptions {
        views::filter_options(&self.zip_codes, &self.predicate)
    }
}
