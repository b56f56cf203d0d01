//! View state: the user-driven parameters a table is derived from.

mod filters;
mod order;
mod state;

pub use filters::FilterSet;
pub use filters::FilterValue;
pub use order::Direction;
pub use order::SortState;
pub use state::ViewState;
