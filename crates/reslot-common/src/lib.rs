pub mod key;
pub mod layout;

pub use key::*;
pub use layout::*;
