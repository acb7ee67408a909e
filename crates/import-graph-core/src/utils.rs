//! Utility functions shared by the engine and its hosts.

pub mod paths;

#[doc(inline)]
pub use paths::{is_prefix, join_dotted, split_dotted};
