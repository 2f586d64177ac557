pub mod input;
pub mod replay;

pub use input::*;
pub use replay::*;
