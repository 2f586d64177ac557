pub mod config;
pub mod detail;
pub mod engine;
pub mod error;
pub mod interaction;
pub mod reconcile;
pub mod surface;
pub mod symbology;

pub use config::*;
pub use detail::*;
pub use engine::*;
pub use error::*;
pub use interaction::*;
pub use reconcile::*;
pub use surface::*;
pub use symbology::*;
