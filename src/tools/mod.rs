pub mod build;
pub mod check;
pub mod convert;
pub mod list;

pub use build::*;
pub use check::*;
pub use convert::*;
pub use list::*;
