// Domain layer: models and ports. No I/O here beyond the trait definitions.

pub mod model;
pub mod ports;
