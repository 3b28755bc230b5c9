pub mod exporter;
pub mod typedefs;
