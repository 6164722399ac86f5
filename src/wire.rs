pub mod client;
pub mod ssl;
