//! pedidos-types: domain records, persistence ports and wire DTOs shared by
//! the server, the repository adapters and the HTTP client.

pub mod api;
pub mod domain;
pub mod ports;
