//! Error types for netlist construction and serialization.
//!
//! Every fallible operation reports synchronously; nothing is retried and
//! there is no partial-success mode. A build either yields a complete,
//! internally consistent netlist or fails outright.

use thiserror::Error;

/// Bus width, index or bounds violation raised by a node constructor.
///
/// Always carries the expected and actual values; preconditions fail loudly
/// rather than being clamped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// Binary operands (or mux branches) with different bus widths.
    #[error("operands have different bus widths: {lhs} and {rhs}")]
    WidthMismatch {
        /// Width of the left-hand operand.
        lhs: u32,
        /// Width of the right-hand operand.
        rhs: u32,
    },

    /// A port constrained to a fixed width received something else.
    #[error("{port} bus width must be {expected}, have {actual}")]
    PortWidth {
        /// Which port was misused.
        port: &'static str,
        /// The width the port requires.
        expected: u32,
        /// The width it was given.
        actual: u32,
    },

    /// A logic operation on a multi-bit bus while ribbon logic is disabled.
    #[error(
        "{op} can only be performed on signals of bus width 1 (have {width}); \
         if your simulator handles ribbon logic operations, call \
         `allow_ribbon_logic(true)` on the builder"
    )]
    RibbonRequired {
        /// The offending operation's netlist token.
        op: &'static str,
        /// The operand width that was given.
        width: u32,
    },

    /// Slice bounds outside `0 <= start < end <= width`.
    #[error("slice must satisfy `0 <= start < end <= width`, i.e. 0 <= {start} < {end} <= {width}")]
    SliceBounds {
        /// Requested start bit (inclusive).
        start: u32,
        /// Requested end bit (exclusive).
        end: u32,
        /// Width of the sliced operand.
        width: u32,
    },

    /// Select index outside `0 <= index < width`.
    #[error("select must satisfy `0 <= index < width`, i.e. 0 <= {index} < {width}")]
    SelectIndex {
        /// Requested bit index.
        index: u32,
        /// Width of the indexed operand.
        width: u32,
    },

    /// Constants must have at least one bit.
    #[error("defining an empty constant is not allowed")]
    EmptyConstant,

    /// Constant bit outside the `0`, `1`, `t`, `f` alphabet.
    #[error("the character {found:?} of the constant {value:?} is not allowed (it should either be 0, 1, t or f)")]
    ConstantChar {
        /// The rejected character.
        found: char,
        /// The whole constant it appeared in.
        value: String,
    },

    /// A forward reference resolved to a signal of the wrong width.
    #[error("forward reference declared with width {declared} resolved to a signal of width {actual}")]
    ForwardWidth {
        /// Width the reference was declared with.
        declared: u32,
        /// Width of the signal it resolved to.
        actual: u32,
    },
}

/// Top-level error for building and serializing a netlist.
#[derive(Debug, Error)]
pub enum NetlistError {
    /// A width/shape rule was violated.
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// An explicit rename or output naming targeted a name already in use.
    #[error("the variable name {0:?} is already used")]
    NameCollision(String),

    /// A forward reference was declared but never bound or supplied.
    #[error("a forward reference of width {width} was never resolved")]
    UnresolvedForward {
        /// Declared width of the dangling reference.
        width: u32,
    },

    /// A forward reference was bound or supplied twice.
    #[error("forward reference is already resolved")]
    ForwardAlreadyResolved,

    /// A forward reference's supplier failed while draining.
    #[error("failed to resolve a forward reference: {0}")]
    ForwardFailed(#[source] Box<NetlistError>),

    /// A structural invariant broke during serialization. Indicates a defect
    /// in this library, never expected in correct operation.
    #[error("internal error: {0}, please report a bug")]
    InternalInconsistency(String),
}

impl NetlistError {
    /// Create a name collision error.
    pub fn name_collision(name: impl Into<String>) -> Self {
        Self::NameCollision(name.into())
    }

    /// Wrap a supplier failure raised while draining forward references.
    #[must_use]
    pub fn forward_failed(inner: Self) -> Self {
        Self::ForwardFailed(Box::new(inner))
    }

    /// Create an internal consistency error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::InternalInconsistency(msg.into())
    }
}
