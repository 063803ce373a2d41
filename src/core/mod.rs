pub mod catalog;
pub mod engine;
pub mod estimator;
pub mod explanation;
pub mod geo;
pub mod scoring;
pub mod selector;

pub use crate::domain::model::{Coordinate, Participant, Recommendation};
pub use crate::domain::ports::AddressResolver;
pub use crate::domain::purpose::{Feature, Purpose};
pub use crate::utils::error::Result;
