pub mod calculator;
pub mod token;
pub mod typedefs;
