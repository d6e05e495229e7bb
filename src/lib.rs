pub mod cli;
pub mod config;
pub mod confirm;
pub mod domain;
pub mod error;
pub mod git;
pub mod hooks;
pub mod manifest;
pub mod options;
pub mod release;
pub mod strategy;
pub mod ui;

pub use error::{ReleaseError, Result};
