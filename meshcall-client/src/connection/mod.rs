mod ws_connection;

pub use ws_connection::*;
