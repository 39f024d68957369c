pub mod activity;
pub mod aggregate;
pub mod error;
pub mod ingest;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod stats;
pub mod types;
