//! Configuration management for the N-Queens solver

pub mod settings;

pub use settings::{
    BoardConfig, CliOverrides, LoggingConfig, OutputConfig, OutputFormat, Settings, WorkerConfig,
    DEFAULT_BOARD_SIZE,
};
