pub mod scripted_transport;
pub mod test_server;

pub use scripted_transport::*;
pub use test_server::*;
