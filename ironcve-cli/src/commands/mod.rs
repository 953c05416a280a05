//! Command handlers -- one module per subcommand

pub mod commit;
pub mod config;
pub mod cpe;
pub mod normalize;
pub mod repo;
pub mod versions;
