pub mod config;
pub mod data;
pub mod errors;
pub mod input;
pub mod report;
pub mod series;
pub mod stats;
