extern crate log;
#[macro_use]
extern crate rocket;

pub mod api;
pub mod config;
pub mod error;
pub mod providers;
pub mod query;
pub mod stamp;
pub mod transcode;
pub mod webhook;
