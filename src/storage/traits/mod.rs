//! Storage traits.

pub mod executor;

pub use executor::GraphExecutor;
