// Domain layer: models and ports. Nothing in here touches the network.

pub mod model;
pub mod ports;
