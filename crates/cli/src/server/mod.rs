pub mod dns;

pub use dns::{bind_dns_socket, serve};
