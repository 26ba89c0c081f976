// Domain layer: the plan data model and the capability ports the planner depends on.

pub mod model;
pub mod ports;
