pub mod batch;
pub mod config;
pub mod serve;
pub mod text;
