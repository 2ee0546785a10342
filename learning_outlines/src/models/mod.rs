pub mod keys;
pub mod outline;
pub mod viewer;

pub use keys::*;
pub use outline::*;
pub use viewer::*;
