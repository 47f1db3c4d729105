pub mod error;
pub mod handlers;
pub mod router;
pub mod server;

pub use server::run_server;
