//! # Domain Layer (Inner Hexagon)
//!
//! Pure chaincode concepts: typed values, operations, argument parsing,
//! responses and write-set invariants.
//! NO I/O, NO async.

pub mod args;
pub mod entities;
pub mod invariants;
pub mod operation;
pub mod value_objects;

pub use args::*;
pub use entities::*;
pub use invariants::*;
pub use operation::*;
pub use value_objects::*;
