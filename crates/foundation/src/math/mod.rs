pub mod geodesy;
pub mod polygon;
pub mod precision;

pub use geodesy::*;
pub use polygon::*;
pub use precision::*;
