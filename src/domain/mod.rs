// Domain layer: run models and the ports the fetch loop is written against.

pub mod model;
pub mod ports;
