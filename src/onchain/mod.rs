pub mod client;
pub mod constants;
pub mod schemas;
pub mod tx;
pub mod typedefs;
