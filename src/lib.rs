pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod model;
pub mod output;
pub mod parse;
pub mod portfolio;
pub mod scale;
pub mod scatter;
pub mod selection;
pub mod session;
pub mod stats;
pub mod theme;
pub mod window;

pub use error::{LocmapError, Result};
