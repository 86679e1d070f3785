//! Dataset acquisition.
//!
//! A dataset is an ordered sequence of JSON values. Whether the caller hands
//! over a literal sequence or an async provider, the resolved [`DataSource`]
//! is fetched the same way.

mod item;
mod source;

pub use item::{comparable_value, stringify};
pub use source::{AcquisitionError, DataProvider, DataSource, Dataset};

pub(crate) use source::panic_message;
