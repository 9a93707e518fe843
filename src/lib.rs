pub mod config;
pub mod constraints;
pub mod consts;
pub mod core_types;
pub mod error;
pub mod graph;
pub mod loader;
pub mod optimizer;
pub mod partition;
pub mod render;
pub mod scorer;
pub mod verifier;
