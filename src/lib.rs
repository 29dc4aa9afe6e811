//! Core engine of a browsable data-mart catalog viewer.
//!
//! The crate owns everything between the raw source table and the payloads
//! an external UI layer renders: loading and cleaning the immutable
//! [`Catalog`], conjunctive filtering over the four key attributes,
//! cascading dropdown domains, the Data-Mart histogram aggregate, and the
//! base64 CSV download. Page layout, widgets, and the event loop belong to
//! the embedding UI; it feeds selection changes in and renders one
//! [`ViewUpdate`] back out per change.

pub mod data;
pub mod state;

pub use data::aggregate::MartCount;
pub use data::export::Download;
pub use data::loader::{load_catalog, read_catalog, LoadError};
pub use data::model::{Attribute, Catalog, EngineConfig, FilteredView, Row, Selection};
pub use data::options::Domains;
pub use state::{Session, TablePayload, ViewUpdate};
