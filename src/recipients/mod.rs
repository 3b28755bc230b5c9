pub mod address;
pub mod error;
pub mod list;
pub mod parser;
pub mod typedefs;
