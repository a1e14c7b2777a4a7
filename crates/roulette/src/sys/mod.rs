pub mod animator;
pub mod runtime;
pub mod server;
