mod duration;
mod form;
mod period;
mod types;

pub use duration::*;
pub use form::*;
pub use period::*;
pub use types::*;
