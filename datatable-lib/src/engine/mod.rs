//! Pipeline stages.
//!
//! Each stage is a pure function over row indices into the caller's record
//! slice, so records are never cloned or reordered in place:
//!
//! - [`filter::apply`] keeps rows passing tab, filters and search, in input order.
//! - [`sort::apply`] stably orders the kept rows by one column.
//! - [`page::Paginator`] slices the ordered rows into pages.
//!
//! [`selection::Selection`] tracks selected identities alongside.

pub mod collate;
pub mod filter;
pub mod page;
pub mod selection;
pub mod sort;
