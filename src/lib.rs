pub mod api;
pub mod config;
pub mod error;
pub mod fit;
pub mod frame;
pub mod geometry;
pub mod layouts;
pub mod outline;
pub mod splitter;
