//! Game implementations.

pub mod solo;
