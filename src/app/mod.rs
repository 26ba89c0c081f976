// Application wiring: turn a configuration into a ready-to-run planner.

pub mod planner;
