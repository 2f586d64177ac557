pub mod category;
pub mod error;
pub mod media;
pub mod poi;
pub mod point_set;
pub mod regions;

pub use category::*;
pub use error::*;
pub use media::*;
pub use poi::*;
pub use point_set::*;
pub use regions::*;
