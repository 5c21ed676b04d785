pub mod closer;
pub mod payments;

pub use self::closer::*;
pub use self::payments::*;
