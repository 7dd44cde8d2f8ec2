//! Route compilation: merging controller and method metadata into the final
//! descriptors handed to the server.

mod compiler;
pub(crate) mod path;

pub use compiler::{RouteCompiler, RouteDescriptor};
