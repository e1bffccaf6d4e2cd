//! # topotree
//!
//! Branch decomposition and progressive simplification of contour trees.
//!
//! This is the umbrella crate that provides convenient access to all topotree
//! functionality. Use the individual crates for more granular control over
//! dependencies.
//!
//! ## Features
//!
//! - **Core**: Contour tree, branch and order data structures, scalar meshes
//! - **Simplification**: Importance functions and the decomposition engine
//! - **I/O**: Order files and scalar mesh input
//!
//! ## Quick Start
//!
//! ```rust
//! use topotree::prelude::*;
//!
//! # fn main() -> topotree::Result<()> {
//! // two minima joining at a saddle below a maximum
//! let tree = ContourTreeData::new(
//!     vec![0.0, 3.0, 4.0, 10.0],
//!     vec![(0, 2), (1, 2), (2, 3)],
//! )?;
//!
//! let mut importance = Persistence::new(&tree);
//! let mut sim = SimplifyCt::new(&tree);
//! sim.simplify(&mut importance)?;
//! let order = sim.simplification_order(&importance)?;
//!
//! assert_eq!(order.order, vec![1, 0]);
//! assert_eq!(order.top_k(1), &[0]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables core, io and simplification
//! - `io`: Order and mesh file support
//! - `simplification`: Branch decomposition
//! - `all`: Enables all features

// Re-export core functionality
pub use topotree_core::*;

// Re-export sub-crates
#[cfg(feature = "io")]
pub use topotree_io as io;

#[cfg(feature = "simplification")]
pub use topotree_simplification as simplification;

/// Convenient imports for common use cases
pub mod prelude {
    pub use topotree_core::*;

    #[cfg(feature = "io")]
    pub use topotree_io::*;

    #[cfg(feature = "simplification")]
    pub use topotree_simplification::*;
}
