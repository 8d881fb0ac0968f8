pub mod cli;
pub mod commands;
pub mod context;
pub mod error;
pub mod legacy_sts;
pub mod region;
pub mod resolver;
pub mod sts;
pub mod types;
