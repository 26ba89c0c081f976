// Adapters layer: concrete implementations of the domain ports.

pub mod explain;
pub mod export;
pub mod input;
pub mod maps;
pub mod places;
pub mod storage;
pub mod weather;
