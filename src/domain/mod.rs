// Domain layer: models, form validation and ports (interfaces). No I/O here.

pub mod forms;
pub mod model;
pub mod ports;
