//! Module header rewriting
//!
//! Reformats the port list of every `module` header to one port per line and,
//! depending on the [`PortRedeclaration`] policy, moves each port's type into a
//! separate declaration statement placed after the header.

mod error;
mod policy;
mod port;
mod redeclare;

pub use error::ModuleError;
pub use policy::PortRedeclaration;
pub use port::Port;
pub use redeclare::{ModuleRedeclarer, redeclare_modules};
