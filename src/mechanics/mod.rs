pub mod control;
pub mod stoch;
pub mod tier;
pub mod weighted;

pub use tier::*;
pub use weighted::*;
