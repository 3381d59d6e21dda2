pub mod catalog;
pub mod cloud;
pub mod config;
pub mod game;
pub mod logging;
pub mod speech;
pub mod storage;
