pub mod capabilities;
pub mod error;
pub mod runner;
pub mod typedefs;
