pub mod config;
pub mod format;
pub mod keywords;
pub mod model;
pub mod parser;
pub mod rank;
pub mod relevance;
pub mod storage;
pub mod wrap;
