//! Column order inside a generated class.
//!
//! Non-nullable columns come before nullable ones, ties break by name, and a
//! column literally named `id` always comes last.

use std::cmp::Ordering;

use super::Column;

/// Name of the identity column kept at the end of every class body.
pub const ID_COLUMN: &str = "id";

/// Sort key `(is id, nullable, name)`.
pub fn sort_key(column: &Column) -> (bool, bool, &str) {
    (column.name() == ID_COLUMN, column.is_nullable(), column.name())
}

pub fn compare(a: &Column, b: &Column) -> Ordering {
    sort_key(a).cmp(&sort_key(b))
}

/// Sort columns into emission order.
pub fn order_columns(columns: &mut [Column]) {
    columns.sort_by(compare);
}
