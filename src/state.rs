use std::sync::Arc;

use serde::Serialize;

use crate::data::aggregate::{mart_counts, MartCount};
use crate::data::export::{download, Download};
use crate::data::filter::filter;
use crate::data::model::{Attribute, Catalog, EngineConfig, Selection};
use crate::data::options::{cascade_domains, Domains};

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Rows per table page shown by the UI layer. A display hint only; the
/// table payload always carries every matching row.
pub const TABLE_PAGE_SIZE: usize = 10;

/// Table payload for the UI: header plus the matching row records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TablePayload {
    pub column_names: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub page_size: usize,
}

/// Everything the UI re-renders after one selection change: the dependent
/// dropdown domains, the table, the histogram feed, and the CSV download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewUpdate {
    pub domains: Domains,
    pub table: TablePayload,
    pub chart: Vec<MartCount>,
    pub download: Download,
}

/// One viewer session: the process-wide catalog plus this session's own
/// selection. Sessions share the catalog by reference and never observe
/// each other's state.
pub struct Session {
    catalog: Arc<Catalog>,
    config: EngineConfig,
    selection: Selection,
}

impl Session {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Session::with_config(catalog, EngineConfig::default())
    }

    pub fn with_config(catalog: Arc<Catalog>, config: EngineConfig) -> Self {
        Session {
            catalog,
            config,
            selection: Selection::default(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Set or clear (`None`) one dropdown and recompute every output.
    pub fn select(&mut self, attr: Attribute, value: Option<String>) -> ViewUpdate {
        self.selection.set(attr, value);
        self.view_update()
    }

    /// Reset every dropdown to the wildcard state.
    pub fn reset(&mut self) -> ViewUpdate {
        self.selection = Selection::default();
        self.view_update()
    }

    /// Install a freshly reloaded catalog. The selection is reset: stale
    /// choices must not survive a reload.
    pub fn set_catalog(&mut self, catalog: Arc<Catalog>) -> ViewUpdate {
        log::info!("catalog replaced: {} rows", catalog.len());
        self.catalog = catalog;
        self.selection = Selection::default();
        self.view_update()
    }

    /// One full synchronous recomputation pass from (catalog, selection).
    ///
    /// Every output is rebuilt on every call; no component keeps memory
    /// between invocations, so no output can go stale. The cost is one
    /// catalog scan per selection change.
    pub fn view_update(&self) -> ViewUpdate {
        let view = filter(&self.catalog, &self.selection, &self.config);
        ViewUpdate {
            domains: cascade_domains(&self.catalog, &self.selection, &self.config),
            table: TablePayload {
                column_names: view.column_names().to_vec(),
                rows: view.rows().map(|row| row.fields.clone()).collect(),
                page_size: TABLE_PAGE_SIZE,
            },
            chart: mart_counts(&view),
            download: download(&view),
        }
    }
}
