// Domain layer: models and the ports every collaborator client implements.

pub mod model;
pub mod ports;
