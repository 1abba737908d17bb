//!
//! Transaction builders, funding and submission.
//!

pub mod finalize;
pub mod funder;
pub mod renewal;
pub mod submit;

pub use self::finalize::*;
pub use self::funder::*;
pub use self::renewal::*;
pub use self::submit::*;
