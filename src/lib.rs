// HTTP Server modules
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;

pub mod config;

// Reply post-processing
pub mod classification;

// Outbound clients
pub mod completion;
pub mod conversation_log;
