// Domain layer: value types, purpose/feature tables and ports (interfaces).

pub mod model;
pub mod ports;
pub mod purpose;
