// Domain layer: forum records and the ports the stores implement.

pub mod model;
pub mod ports;
