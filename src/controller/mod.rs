//! Orchestration of data loading, selection and rendering.

pub mod selection;
pub mod source;
pub mod view;

// Re-export main types
pub use selection::{SelectOption, SelectionControl};
pub use source::{join_location, AnySource, DataSource, FileSource, HttpSource};
pub use view::{fetch_dataset, fetch_table, LoadTicket, ViewController};
