pub mod config;
pub mod model;
pub mod panel;
pub mod storage;
