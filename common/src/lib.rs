pub mod proto {
    tonic::include_proto!("four_lines");
}

pub mod config;
pub mod games;
pub mod identifiers;
pub mod logger;

pub use identifiers::*;
pub use proto::*;
