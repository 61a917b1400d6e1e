// Domain layer: student records, grades and the ports the pipeline runs against.

pub mod model;
pub mod ports;
