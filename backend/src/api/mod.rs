pub mod compare;
pub mod search;
pub mod video;

pub use compare::*;
pub use search::*;
pub use video::*;
