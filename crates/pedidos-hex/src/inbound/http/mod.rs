mod handlers;
mod server;

pub use server::{AppState, HttpServer, HttpServerConfig};
