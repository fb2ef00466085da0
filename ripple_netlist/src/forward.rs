//! Forward references: placeholders for variables defined later in program
//! order.
//!
//! A feedback loop (a register output feeding its own next-state logic)
//! cannot be constructed in one pass, so the looping operand is declared as
//! a [`Forward`] of known width and resolved afterwards, either by an
//! explicit bind or by a supplier closure run while draining before
//! serialization. Each slot resolves exactly once and caches its value.

use std::fmt;

use crate::builder::NetlistBuilder;
use crate::error::NetlistError;
use crate::node::{NodeId, Signal};

/// Closure that produces the referenced signal on demand. It may construct
/// new nodes, including further forward references.
pub(crate) type Supplier = Box<dyn FnOnce(&mut NetlistBuilder) -> Result<Signal, NetlistError>>;

/// Handle to a forward-reference slot.
///
/// Usable anywhere an operand is expected; the declared width stands in for
/// the eventual signal's width until resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Forward {
    pub(crate) id: usize,
    pub(crate) width: u32,
}

impl Forward {
    /// The declared bus width of the eventual signal.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }
}

/// Resolution state of one slot. `Pending -> Resolved` is terminal;
/// `Supplied` is a pending slot whose value the drain loop can produce.
pub(crate) enum ForwardState {
    Pending,
    Supplied(Supplier),
    Resolved(NodeId),
}

impl fmt::Debug for ForwardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("Pending"),
            Self::Supplied(_) => f.write_str("Supplied(..)"),
            Self::Resolved(id) => write!(f, "Resolved({id:?})"),
        }
    }
}

/// One forward-reference slot in the builder's arena.
#[derive(Debug)]
pub(crate) struct ForwardSlot {
    pub(crate) width: u32,
    pub(crate) state: ForwardState,
}

impl ForwardSlot {
    /// The resolved node, if resolution has happened.
    pub(crate) const fn resolved(&self) -> Option<NodeId> {
        match self.state {
            ForwardState::Resolved(id) => Some(id),
            _ => None,
        }
    }
}
