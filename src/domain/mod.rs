pub mod announcement;
pub mod audience;

pub use announcement::*;
pub use audience::*;
