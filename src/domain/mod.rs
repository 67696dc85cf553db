// Domain layer: lead records and the ports the pipeline depends on. No I/O here.

pub mod model;
pub mod ports;
