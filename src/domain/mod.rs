// Domain layer: wire descriptors, startup states and the PMS port.

pub mod model;
pub mod ports;
