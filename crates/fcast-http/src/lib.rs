#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// DefaultForecastClient exposes the generic client with a private backend type;
// callers use it through the core port traits.
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod models;
mod port;
mod url;

// Client
pub use client::DefaultForecastClient;

// Configuration
pub use config::{ClientConfig, DEFAULT_PLUGIN_ID};
