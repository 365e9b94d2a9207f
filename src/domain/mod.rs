// Domain layer: cookie models, lookup tables, ports (interfaces) and the pure
// validation / change-detection / alerting services.

pub mod baseline;
pub mod catalog;
pub mod model;
pub mod ports;

pub mod services;
