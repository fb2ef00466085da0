//! In-memory construction of bit/bus level circuit netlists.
//!
//! A [`NetlistBuilder`] owns the circuit graph: input declarations, internal
//! equations and output markings, in construction order. Node constructors
//! (`and`, `reg`, `mux`, `ram`, `slice`, ...) validate bus widths, mint unique
//! variable names and return copyable [`Signal`] handles. Feedback loops are
//! expressed with [`Forward`] references that resolve before serialization.
//! [`NetlistBuilder::serialize`] emits the flat textual netlist format
//! consumed by the downstream circuit simulator.

mod builder;
mod error;
mod forward;
mod names;
mod node;
mod serialize;
mod shape;

pub use builder::NetlistBuilder;
pub use error::{NetlistError, ShapeError};
pub use forward::Forward;
pub use node::{BinaryOp, Operand, Signal, UnaryOp};
