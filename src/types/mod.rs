mod caller_identity;
mod check;

pub use caller_identity::*;
pub use check::*;
