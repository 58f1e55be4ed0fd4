pub mod error;
pub mod rpc;
pub mod types;
