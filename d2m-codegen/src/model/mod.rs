//! Intermediate model entities.
//!
//! - [`Column`] - One column with its resolved type
//! - [`Table`] - One generated model unit
//! - [`TableBuilder`] - Reflected table to [`Table`] for one scope
//! - [`order_columns`] - Emission order for a table's columns

mod column;
mod ordering;
mod table;

pub use column::Column;
pub use ordering::{ID_COLUMN, compare, order_columns, sort_key};
pub use table::{Table, TableBuilder};
