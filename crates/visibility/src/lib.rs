pub mod dedup;
pub mod error;
pub mod pinned;
pub mod policy;
pub mod rank;
pub mod selector;

pub use dedup::*;
pub use error::*;
pub use pinned::*;
pub use policy::*;
pub use rank::*;
pub use selector::*;
