//! Top-level facade crate for pushroute.
//!
//! Re-exports the wire contracts and the dispatch runtime so users can depend on a single crate.

pub mod core {
    pub use pushroute_core::*;
}

pub mod dispatch {
    pub use pushroute_dispatch::*;
}
