pub mod migrate;
pub mod server;
pub mod session;
pub mod week;
