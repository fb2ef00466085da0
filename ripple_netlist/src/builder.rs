//! The top-level netlist construction context.
//!
//! A [`NetlistBuilder`] owns the node arena, the forward-reference slots,
//! the naming registry and the three ordered collections (inputs, internal
//! equations, outputs) whose insertion order fixes the emitted text. One
//! builder describes one circuit; build several by using separate builders
//! or calling [`NetlistBuilder::reset`] in between. Sharing a builder
//! between concurrent builds is unsupported.

use std::mem;

use tracing::{debug, trace};

use crate::error::{NetlistError, ShapeError};
use crate::forward::{Forward, ForwardSlot, ForwardState};
use crate::names::NameTable;
use crate::node::{BinaryOp, Node, NodeId, NodeKind, Operand, Signal, UnaryOp};
use crate::serialize;
use crate::shape;

/// Builds one circuit graph and serializes it to netlist text.
#[derive(Debug, Default)]
pub struct NetlistBuilder {
    pub(crate) names: NameTable,
    pub(crate) nodes: Vec<Node>,
    pub(crate) forwards: Vec<ForwardSlot>,
    pub(crate) inputs: Vec<NodeId>,
    pub(crate) equations: Vec<NodeId>,
    pub(crate) outputs: Vec<NodeId>,
    ribbon_logic: bool,
}

impl NetlistBuilder {
    /// Create a builder for a fresh generation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable ribbon logic: logic gates on whole buses instead of
    /// single wires. Only meaningful when the downstream simulator supports
    /// it. The flag survives [`reset`](Self::reset).
    pub fn allow_ribbon_logic(&mut self, enable: bool) {
        self.ribbon_logic = enable;
    }

    /// Whether ribbon logic operations are currently allowed.
    #[must_use]
    pub const fn ribbon_logic(&self) -> bool {
        self.ribbon_logic
    }

    /// Discard the whole generation: every node, name, forward reference and
    /// the fresh-name counter. Signal handles from before the reset must not
    /// be used afterwards.
    pub fn reset(&mut self) {
        debug!("resetting netlist builder");
        self.names.clear();
        self.nodes.clear();
        self.forwards.clear();
        self.inputs.clear();
        self.equations.clear();
        self.outputs.clear();
    }

    // ---- node constructors ----

    /// Declare a circuit input with a system-minted name.
    ///
    /// # Errors
    /// Fails with [`NetlistError::NameCollision`] when the minted name was
    /// already registered explicitly.
    pub fn input(&mut self, width: u32) -> Result<Signal, NetlistError> {
        let name = format!(
            "{}_{}",
            NodeKind::Input.name_prefix(),
            self.names.next_counter()
        );
        self.names.register(&name)?;
        Ok(self.push_input(name, width, true))
    }

    /// Declare a circuit input under an explicitly chosen name.
    ///
    /// # Errors
    /// Fails with [`NetlistError::NameCollision`] when the name is taken.
    pub fn input_named(&mut self, width: u32, name: &str) -> Result<Signal, NetlistError> {
        self.names.register(name)?;
        Ok(self.push_input(name.to_owned(), width, false))
    }

    /// A constant over the `0`, `1`, `t`, `f` alphabet (`t`/`f` are
    /// don't-care bits); the width is the string length.
    ///
    /// # Errors
    /// Fails with a [`ShapeError`] for an empty string or a character
    /// outside the alphabet.
    pub fn constant(&mut self, bits: &str) -> Result<Signal, NetlistError> {
        shape::constant_bits(bits)?;
        let width = bits.len() as u32;
        Ok(self.push_equation(width, NodeKind::Constant(bits.to_owned())))
    }

    /// A unary gate (`NOT`, `REG`) on `x`.
    ///
    /// # Errors
    /// Fails with a [`ShapeError`] on a multi-bit operand while ribbon
    /// logic is disabled.
    pub fn unary(&mut self, op: UnaryOp, x: impl Into<Operand>) -> Result<Signal, NetlistError> {
        let x = x.into();
        shape::ribbon_gate(self.ribbon_logic, op.token(), x.width())?;
        Ok(self.push_equation(x.width(), NodeKind::Unary { op, x }))
    }

    /// Bitwise negation.
    ///
    /// # Errors
    /// See [`unary`](Self::unary).
    pub fn not(&mut self, x: impl Into<Operand>) -> Result<Signal, NetlistError> {
        self.unary(UnaryOp::Not, x)
    }

    /// Register: the operand's value delayed by one tick.
    ///
    /// # Errors
    /// See [`unary`](Self::unary).
    pub fn reg(&mut self, x: impl Into<Operand>) -> Result<Signal, NetlistError> {
        self.unary(UnaryOp::Reg, x)
    }

    /// A binary gate (`AND`, `NAND`, `OR`, `XOR`) on `lhs` and `rhs`.
    ///
    /// # Errors
    /// Fails with a [`ShapeError`] when the operand widths differ, or on
    /// multi-bit operands while ribbon logic is disabled.
    pub fn binary(
        &mut self,
        op: BinaryOp,
        lhs: impl Into<Operand>,
        rhs: impl Into<Operand>,
    ) -> Result<Signal, NetlistError> {
        let (lhs, rhs) = (lhs.into(), rhs.into());
        shape::same_width(lhs.width(), rhs.width())?;
        shape::ribbon_gate(self.ribbon_logic, op.token(), lhs.width())?;
        Ok(self.push_equation(lhs.width(), NodeKind::Binary { op, lhs, rhs }))
    }

    /// Logical conjunction.
    ///
    /// # Errors
    /// See [`binary`](Self::binary).
    pub fn and(
        &mut self,
        lhs: impl Into<Operand>,
        rhs: impl Into<Operand>,
    ) -> Result<Signal, NetlistError> {
        self.binary(BinaryOp::And, lhs, rhs)
    }

    /// Negated conjunction.
    ///
    /// # Errors
    /// See [`binary`](Self::binary).
    pub fn nand(
        &mut self,
        lhs: impl Into<Operand>,
        rhs: impl Into<Operand>,
    ) -> Result<Signal, NetlistError> {
        self.binary(BinaryOp::Nand, lhs, rhs)
    }

    /// Logical disjunction.
    ///
    /// # Errors
    /// See [`binary`](Self::binary).
    pub fn or(
        &mut self,
        lhs: impl Into<Operand>,
        rhs: impl Into<Operand>,
    ) -> Result<Signal, NetlistError> {
        self.binary(BinaryOp::Or, lhs, rhs)
    }

    /// Exclusive or.
    ///
    /// # Errors
    /// See [`binary`](Self::binary).
    pub fn xor(
        &mut self,
        lhs: impl Into<Operand>,
        rhs: impl Into<Operand>,
    ) -> Result<Signal, NetlistError> {
        self.binary(BinaryOp::Xor, lhs, rhs)
    }

    /// Two-way multiplexer: `a` when `choice` is 0, `b` when it is 1.
    ///
    /// # Errors
    /// Fails with a [`ShapeError`] unless `choice` is one bit wide and `a`
    /// and `b` have equal widths.
    pub fn mux(
        &mut self,
        choice: impl Into<Operand>,
        a: impl Into<Operand>,
        b: impl Into<Operand>,
    ) -> Result<Signal, NetlistError> {
        let (choice, a, b) = (choice.into(), a.into(), b.into());
        shape::port_width("MUX choice", 1, choice.width())?;
        shape::same_width(a.width(), b.width())?;
        Ok(self.push_equation(a.width(), NodeKind::Mux { choice, a, b }))
    }

    /// Read-only memory of `2^addr_size` words of `word_size` bits.
    ///
    /// # Errors
    /// Fails with a [`ShapeError`] unless `read_addr` is `addr_size` bits
    /// wide.
    pub fn rom(
        &mut self,
        addr_size: u32,
        word_size: u32,
        read_addr: impl Into<Operand>,
    ) -> Result<Signal, NetlistError> {
        let read_addr = read_addr.into();
        shape::port_width("ROM read address", addr_size, read_addr.width())?;
        Ok(self.push_equation(
            word_size,
            NodeKind::Rom {
                addr_size,
                word_size,
                read_addr,
            },
        ))
    }

    /// Random-access memory of `2^addr_size` words of `word_size` bits,
    /// with one synchronous write port.
    ///
    /// Every port width is validated before anything is registered, so a
    /// failed construction leaves the builder untouched.
    ///
    /// # Errors
    /// Fails with a [`ShapeError`] unless `read_addr` and `write_addr` are
    /// `addr_size` bits, `write_enable` is one bit and `write_data` is
    /// `word_size` bits.
    pub fn ram(
        &mut self,
        addr_size: u32,
        word_size: u32,
        read_addr: impl Into<Operand>,
        write_enable: impl Into<Operand>,
        write_addr: impl Into<Operand>,
        write_data: impl Into<Operand>,
    ) -> Result<Signal, NetlistError> {
        let read_addr = read_addr.into();
        let write_enable = write_enable.into();
        let write_addr = write_addr.into();
        let write_data = write_data.into();
        shape::port_width("RAM read address", addr_size, read_addr.width())?;
        shape::port_width("RAM write_enable", 1, write_enable.width())?;
        shape::port_width("RAM write address", addr_size, write_addr.width())?;
        shape::port_width("RAM write data", word_size, write_data.width())?;
        Ok(self.push_equation(
            word_size,
            NodeKind::Ram {
                addr_size,
                word_size,
                read_addr,
                write_enable,
                write_addr,
                write_data,
            },
        ))
    }

    /// Bus concatenation; the result width is the sum of both widths.
    ///
    /// # Errors
    /// Currently infallible in practice; kept fallible for uniformity with
    /// the other constructors.
    pub fn concat(
        &mut self,
        lhs: impl Into<Operand>,
        rhs: impl Into<Operand>,
    ) -> Result<Signal, NetlistError> {
        let (lhs, rhs) = (lhs.into(), rhs.into());
        let width = lhs.width() + rhs.width();
        Ok(self.push_equation(width, NodeKind::Concat { lhs, rhs }))
    }

    /// The sub-bus `x[start..end]` (exclusive end); the result width is
    /// `end - start`.
    ///
    /// When `x` carries a hand-chosen name, the slice gets a best-effort
    /// derived name (`{x}_slc_{start}_{end-1}`) for netlist readability.
    ///
    /// # Errors
    /// Fails with a [`ShapeError`] unless `0 <= start < end <= x.width()`.
    pub fn slice(
        &mut self,
        start: u32,
        end: u32,
        x: impl Into<Operand>,
    ) -> Result<Signal, NetlistError> {
        let x = x.into();
        shape::slice_bounds(start, end, x.width())?;
        let derived = self.derived_slice_name(&x, start, end);
        let signal = self.push_equation(end - start, NodeKind::Slice { start, end, x });
        if let Some(candidate) = derived {
            self.try_rename(signal, &candidate, true);
        }
        Ok(signal)
    }

    /// The single bit `x[index]`.
    ///
    /// When `x` carries a hand-chosen name, the select gets a best-effort
    /// derived name (`{x}_sel_{index}`) for netlist readability.
    ///
    /// # Errors
    /// Fails with a [`ShapeError`] unless `0 <= index < x.width()`.
    pub fn select(&mut self, index: u32, x: impl Into<Operand>) -> Result<Signal, NetlistError> {
        let x = x.into();
        shape::select_index(index, x.width())?;
        let derived = self.derived_select_name(&x, index);
        let signal = self.push_equation(1, NodeKind::Select { index, x });
        if let Some(candidate) = derived {
            self.try_rename(signal, &candidate, true);
        }
        Ok(signal)
    }

    // ---- naming ----

    /// Hard-rename a variable. The previous name is released.
    ///
    /// # Errors
    /// Fails with [`NetlistError::NameCollision`] when `new_name` is taken
    /// by another variable; renaming to the current name is a no-op.
    pub fn rename(&mut self, signal: Signal, new_name: &str) -> Result<(), NetlistError> {
        self.rename_with(signal, new_name, false)
    }

    /// Rename if the new name is available and deemed better than the old
    /// one: an auto-generated candidate never replaces a hand-chosen name,
    /// and collisions are swallowed. Returns whether the rename happened.
    pub fn try_rename(&mut self, signal: Signal, new_name: &str, auto_named: bool) -> bool {
        if !self.nodes[signal.id.0].auto_named && auto_named {
            return false;
        }
        self.rename_with(signal, new_name, auto_named).is_ok()
    }

    /// Suggest a source-level name for an auto-named variable.
    ///
    /// Best-effort: tries `hint` itself, or `_{hint}_{n}` when `hint` is
    /// taken. Returns whether a rename happened. Never required for
    /// correctness, only for netlist readability.
    pub fn name_hint(&mut self, signal: Signal, hint: &str) -> bool {
        if !self.nodes[signal.id.0].auto_named {
            return false;
        }
        let candidate = if self.names.contains(hint) {
            format!("_{hint}_{}", self.names.next_counter())
        } else {
            hint.to_owned()
        };
        self.try_rename(signal, &candidate, false)
    }

    /// Append a variable to the ordered output collection, optionally hard
    /// renaming it first.
    ///
    /// # Errors
    /// Fails with [`NetlistError::NameCollision`] when the requested output
    /// name is taken; the variable is then not marked.
    pub fn mark_output(
        &mut self,
        signal: Signal,
        name: Option<&str>,
    ) -> Result<(), NetlistError> {
        if let Some(name) = name {
            self.rename(signal, name)?;
        }
        self.outputs.push(signal.id);
        Ok(())
    }

    // ---- forward references ----

    /// Declare a forward reference of the given width, to be resolved later
    /// with [`bind`](Self::bind) or [`supply`](Self::supply).
    pub fn forward(&mut self, width: u32) -> Forward {
        let id = self.forwards.len();
        self.forwards.push(ForwardSlot {
            width,
            state: ForwardState::Pending,
        });
        Forward { id, width }
    }

    /// Declare a forward reference together with its supplier. The supplier
    /// runs while draining before serialization and may construct further
    /// nodes and forward references.
    pub fn defer_with<F>(&mut self, width: u32, supplier: F) -> Forward
    where
        F: FnOnce(&mut Self) -> Result<Signal, NetlistError> + 'static,
    {
        let fwd = self.forward(width);
        self.forwards[fwd.id].state = ForwardState::Supplied(Box::new(supplier));
        fwd
    }

    /// Resolve a pending forward reference to an existing signal.
    ///
    /// # Errors
    /// Fails with a [`ShapeError`] when the widths disagree, or with
    /// [`NetlistError::ForwardAlreadyResolved`] when the slot already has a
    /// value or a supplier.
    pub fn bind(&mut self, forward: Forward, signal: Signal) -> Result<(), NetlistError> {
        if !matches!(self.forwards[forward.id].state, ForwardState::Pending) {
            return Err(NetlistError::ForwardAlreadyResolved);
        }
        if signal.width != forward.width {
            return Err(ShapeError::ForwardWidth {
                declared: forward.width,
                actual: signal.width,
            }
            .into());
        }
        self.forwards[forward.id].state = ForwardState::Resolved(signal.id);
        Ok(())
    }

    /// Attach a supplier to a pending forward reference, to run while
    /// draining before serialization.
    ///
    /// # Errors
    /// Fails with [`NetlistError::ForwardAlreadyResolved`] when the slot
    /// already has a value or a supplier.
    pub fn supply<F>(&mut self, forward: Forward, supplier: F) -> Result<(), NetlistError>
    where
        F: FnOnce(&mut Self) -> Result<Signal, NetlistError> + 'static,
    {
        if !matches!(self.forwards[forward.id].state, ForwardState::Pending) {
            return Err(NetlistError::ForwardAlreadyResolved);
        }
        self.forwards[forward.id].state = ForwardState::Supplied(Box::new(supplier));
        Ok(())
    }

    /// Run suppliers until no supplied slot remains, then require every
    /// slot to be resolved.
    ///
    /// Suppliers may register new forward references, so this iterates to a
    /// fixed point. A supplier failure aborts the drain; already-resolved
    /// slots keep their cached value but the build must not be serialized.
    pub(crate) fn drain_forwards(&mut self) -> Result<(), NetlistError> {
        loop {
            let Some(index) = self
                .forwards
                .iter()
                .position(|slot| matches!(slot.state, ForwardState::Supplied(_)))
            else {
                break;
            };
            let state = mem::replace(&mut self.forwards[index].state, ForwardState::Pending);
            let ForwardState::Supplied(supplier) = state else {
                continue;
            };
            debug!(slot = index, "resolving forward reference");
            let signal = supplier(self).map_err(NetlistError::forward_failed)?;
            let declared = self.forwards[index].width;
            if signal.width != declared {
                return Err(ShapeError::ForwardWidth {
                    declared,
                    actual: signal.width,
                }
                .into());
            }
            self.forwards[index].state = ForwardState::Resolved(signal.id);
        }
        if let Some(slot) = self
            .forwards
            .iter()
            .find(|slot| matches!(slot.state, ForwardState::Pending))
        {
            return Err(NetlistError::UnresolvedForward { width: slot.width });
        }
        Ok(())
    }

    // ---- serialization ----

    /// Drain every forward reference, then emit the four-section netlist
    /// text.
    ///
    /// # Errors
    /// Fails when draining fails (unresolved references, supplier errors,
    /// width mismatches) or, never in correct operation, with
    /// [`NetlistError::InternalInconsistency`] when the graph collections
    /// changed while emitting.
    pub fn serialize(&mut self) -> Result<String, NetlistError> {
        self.drain_forwards()?;
        debug!(
            inputs = self.inputs.len(),
            outputs = self.outputs.len(),
            equations = self.equations.len(),
            "serializing netlist"
        );
        let lens = (self.inputs.len(), self.outputs.len(), self.equations.len());
        let text = serialize::render(self)?;
        if lens != (self.inputs.len(), self.outputs.len(), self.equations.len()) {
            return Err(NetlistError::internal(
                "collection lengths changed during serialization",
            ));
        }
        Ok(text)
    }

    // ---- introspection ----

    /// The variable's current name.
    #[must_use]
    pub fn name_of(&self, signal: Signal) -> &str {
        &self.nodes[signal.id.0].name
    }

    /// Whether the variable's name is still system-generated.
    #[must_use]
    pub fn is_auto_named(&self, signal: Signal) -> bool {
        self.nodes[signal.id.0].auto_named
    }

    /// Whether any live variable carries this name.
    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of declared inputs.
    #[must_use]
    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    /// Number of internal equations.
    #[must_use]
    pub fn equation_count(&self) -> usize {
        self.equations.len()
    }

    /// Number of marked outputs.
    #[must_use]
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    // ---- internals ----

    fn push_input(&mut self, name: String, width: u32, auto_named: bool) -> Signal {
        let id = NodeId(self.nodes.len());
        trace!(name = %name, width, "new input");
        self.nodes.push(Node {
            name,
            width,
            auto_named,
            kind: NodeKind::Input,
        });
        self.inputs.push(id);
        Signal { id, width }
    }

    fn push_equation(&mut self, width: u32, kind: NodeKind) -> Signal {
        let name = self.names.allocate_fresh(kind.name_prefix());
        let id = NodeId(self.nodes.len());
        trace!(name = %name, width, "new equation");
        self.nodes.push(Node {
            name,
            width,
            auto_named: true,
            kind,
        });
        self.equations.push(id);
        Signal { id, width }
    }

    fn rename_with(
        &mut self,
        signal: Signal,
        new_name: &str,
        auto_named: bool,
    ) -> Result<(), NetlistError> {
        if self.nodes[signal.id.0].name == new_name {
            return Ok(());
        }
        let old = self.nodes[signal.id.0].name.clone();
        self.names.rename(&old, new_name)?;
        trace!(old = %old, new = %new_name, "renamed variable");
        let node = &mut self.nodes[signal.id.0];
        node.name = new_name.to_owned();
        node.auto_named = auto_named;
        Ok(())
    }

    /// Readable name for a slice of a hand-named bus, unless the operand is
    /// itself an unresolved forward or already a derived slice name.
    fn derived_slice_name(&self, x: &Operand, start: u32, end: u32) -> Option<String> {
        let Operand::Signal(signal) = x else {
            return None;
        };
        let node = &self.nodes[signal.id.0];
        if node.auto_named || node.name.contains("_slc_") {
            return None;
        }
        let underscore = if node.name.starts_with('_') { "" } else { "_" };
        Some(format!(
            "{underscore}{}_slc_{start}_{}",
            node.name,
            end - 1
        ))
    }

    /// Readable name for a selected bit of a hand-named bus.
    fn derived_select_name(&self, x: &Operand, index: u32) -> Option<String> {
        let Operand::Signal(signal) = x else {
            return None;
        };
        let node = &self.nodes[signal.id.0];
        if node.auto_named {
            return None;
        }
        let underscore = if node.name.starts_with('_') { "" } else { "_" };
        Some(format!("{underscore}{}_sel_{index}", node.name))
    }
}
