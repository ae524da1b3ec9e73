// Domain layer: gem models, request parsing and ports (interfaces).

pub mod model;
pub mod ports;
pub mod submission;
pub mod training;
