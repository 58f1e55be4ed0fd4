pub mod config;
pub mod error;
pub mod params;
pub mod routes;
pub mod rpc_client;
pub mod state;
