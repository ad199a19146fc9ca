pub mod archive;
pub mod batch;
pub mod classifier;
pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod scan;
