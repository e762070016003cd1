//! Dialect-aware `CREATE TABLE` scripts.
//!
//! [`TableBuilder`] collects columns and indexes for one table and renders
//! them as a table statement followed by one `CREATE INDEX` per index.
//! Quoting and type mapping come from the bound [`Dialect`](crate::Dialect).

mod column;
mod table;

pub use column::{Column, ForeignKey, ForeignKeyAction, Index};
pub use table::{ColumnBuilder, ColumnId, TableBuilder};
