pub mod pack;
pub mod search;

pub use pack::Wolf;
pub use search::{WolfPack, WolfPackParams};
