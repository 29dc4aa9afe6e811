use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Attribute – the four categorical key columns
// ---------------------------------------------------------------------------

/// One of the four categorical attributes every catalog row is keyed by,
/// declared in cascade order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Server,
    Db,
    Schema,
    DataMart,
}

impl Attribute {
    /// Fixed dropdown cascade: SERVER → DB → SCHEMA → DATA MART.
    pub const CASCADE: [Attribute; 4] = [
        Attribute::Server,
        Attribute::Db,
        Attribute::Schema,
        Attribute::DataMart,
    ];

    /// Exact column name in the source table (case- and space-sensitive).
    pub fn column_name(self) -> &'static str {
        match self {
            Attribute::Server => "SERVER",
            Attribute::Db => "DB",
            Attribute::Schema => "SCHEMA",
            Attribute::DataMart => "DATA MART",
        }
    }

    /// Position of this attribute in [`Attribute::CASCADE`].
    pub fn cascade_position(self) -> usize {
        self as usize
    }
}

// ---------------------------------------------------------------------------
// Row / Catalog – the loaded source table
// ---------------------------------------------------------------------------

/// One catalog record: every source column value, in the catalog's header
/// order. Extra columns beyond the four keys ride along verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub fields: Vec<String>,
}

/// A required key column absent from the source header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("source table is missing required column `{0}`")]
pub struct MissingColumn(pub &'static str);

/// The full cleaned source table. Built once per load and treated as
/// immutable afterwards; every row is guaranteed to carry a value in all
/// four key columns and to match the header width.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Ordered source column names, header order preserved.
    pub column_names: Vec<String>,
    /// Clean rows, source order preserved.
    pub rows: Vec<Row>,
    /// Index of each key column within `column_names`, cascade order.
    key_indices: [usize; 4],
}

impl Catalog {
    /// Build a catalog from a header and raw records.
    ///
    /// Records that are short or blank in any key column are dropped here
    /// and never resurface; only the header itself can make construction
    /// fail.
    pub fn from_records(
        column_names: Vec<String>,
        records: Vec<Vec<String>>,
    ) -> Result<Catalog, MissingColumn> {
        let mut key_indices = [0usize; 4];
        for (slot, attr) in key_indices.iter_mut().zip(Attribute::CASCADE) {
            *slot = column_names
                .iter()
                .position(|c| c == attr.column_name())
                .ok_or(MissingColumn(attr.column_name()))?;
        }

        let width = column_names.len();
        let total = records.len();
        let rows: Vec<Row> = records
            .into_iter()
            .filter(|fields| {
                fields.len() == width && key_indices.iter().all(|&i| !fields[i].is_empty())
            })
            .map(|fields| Row { fields })
            .collect();

        if rows.len() < total {
            log::debug!(
                "catalog cleaned: kept {} rows, dropped {} incomplete",
                rows.len(),
                total - rows.len()
            );
        }

        Ok(Catalog {
            column_names,
            rows,
            key_indices,
        })
    }

    /// The zero-row catalog carrying just the key columns. The loader
    /// falls back to this when the source is unreadable.
    pub fn empty() -> Catalog {
        Catalog {
            column_names: Attribute::CASCADE
                .iter()
                .map(|a| a.column_name().to_string())
                .collect(),
            rows: Vec::new(),
            key_indices: [0, 1, 2, 3],
        }
    }

    /// Column index of a key attribute.
    pub fn key_index(&self, attr: Attribute) -> usize {
        self.key_indices[attr.cascade_position()]
    }

    /// A row's value for one of the key attributes.
    pub fn attribute_value<'a>(&self, row: &'a Row, attr: Attribute) -> &'a str {
        &row.fields[self.key_index(attr)]
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the catalog has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Selection – one value or wildcard per attribute
// ---------------------------------------------------------------------------

/// The partial filter a session holds: one chosen value or `None`
/// (wildcard) per attribute. The default value is the all-wildcard
/// selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub server: Option<String>,
    pub db: Option<String>,
    pub schema: Option<String>,
    pub data_mart: Option<String>,
}

impl Selection {
    /// The chosen value for an attribute, if any.
    pub fn get(&self, attr: Attribute) -> Option<&str> {
        match attr {
            Attribute::Server => self.server.as_deref(),
            Attribute::Db => self.db.as_deref(),
            Attribute::Schema => self.schema.as_deref(),
            Attribute::DataMart => self.data_mart.as_deref(),
        }
    }

    /// Set or clear (`None`) one attribute.
    pub fn set(&mut self, attr: Attribute, value: Option<String>) {
        let slot = match attr {
            Attribute::Server => &mut self.server,
            Attribute::Db => &mut self.db,
            Attribute::Schema => &mut self.schema,
            Attribute::DataMart => &mut self.data_mart,
        };
        *slot = value;
    }

    /// The selection as seen by `attr`'s own dropdown: only entries at
    /// strictly earlier cascade positions survive, so a stale deeper
    /// choice never constrains its own domain.
    pub fn restricted_before(&self, attr: Attribute) -> Selection {
        let mut restricted = Selection::default();
        for upstream in &Attribute::CASCADE[..attr.cascade_position()] {
            restricted.set(*upstream, self.get(*upstream).map(str::to_string));
        }
        restricted
    }
}

// ---------------------------------------------------------------------------
// FilteredView – an ephemeral read-only row subset
// ---------------------------------------------------------------------------

/// The rows matching one selection. Borrows the catalog, so row data is
/// shared rather than copied and callers get read access only.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    catalog: &'a Catalog,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    pub(crate) fn new(catalog: &'a Catalog, indices: Vec<usize>) -> Self {
        FilteredView { catalog, indices }
    }

    /// The catalog this view was cut from.
    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Source column names, original order.
    pub fn column_names(&self) -> &'a [String] {
        &self.catalog.column_names
    }

    /// Catalog indices of the matching rows, in catalog order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Iterate the matching rows in catalog order.
    pub fn rows(&self) -> impl Iterator<Item = &'a Row> + '_ {
        self.indices.iter().map(|&i| &self.catalog.rows[i])
    }

    /// Number of matching rows.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether no row matched.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

// ---------------------------------------------------------------------------
// EngineConfig – shared tunables for filtering and option derivation
// ---------------------------------------------------------------------------

/// Schema labels recognized as canonical in the source inventory. Raw data
/// carries malformed duplicates of these that must never become options.
pub const ALLOWED_SCHEMAS: [&str; 4] = ["dbo", "mer", "AADUtilUser", "WSS\\lcacho2"];

/// Tunables shared by the filter engine and the option deriver, so themed
/// front-end variants configure one canonical implementation instead of
/// forking it.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Attributes whose comparisons fold case on both sides.
    pub fold_case: BTreeSet<Attribute>,
    /// Canonical schema labels; values outside the list never become
    /// dropdown options. `None` disables the guard.
    pub schema_allow_list: Option<BTreeSet<String>>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            fold_case: BTreeSet::from([Attribute::Server]),
            schema_allow_list: Some(ALLOWED_SCHEMAS.iter().map(|s| s.to_string()).collect()),
        }
    }
}
