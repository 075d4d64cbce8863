//! Command implementations for the grinderctl CLI

pub mod agent;
pub mod completions;
pub mod configure;
pub mod console;
pub mod helpers;
pub mod tcpproxy;
pub mod version;
