// Domain layer: lead models, phone number rules and the ports the gateway talks through.

pub mod model;
pub mod phone;
pub mod ports;
