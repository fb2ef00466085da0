//! Serialization of a fully-resolved builder to the netlist text format.
//!
//! Four sections, in this exact order: `INPUT`, `OUTPUT`, `VAR`, then `IN`
//! followed by one line per internal equation in construction order. This
//! layout is the wire contract with the downstream simulator and must stay
//! byte-stable, including the single space after a keyword with an empty
//! list and the inclusive end index emitted for `SLICE`.

use itertools::Itertools;

use crate::builder::NetlistBuilder;
use crate::error::NetlistError;
use crate::node::{Node, NodeKind, Operand};

/// Emit the netlist text. The builder must have drained its forward
/// references; an unresolved operand here is an internal defect.
pub(crate) fn render(builder: &NetlistBuilder) -> Result<String, NetlistError> {
    let mut out = String::new();

    out.push_str("INPUT ");
    out.push_str(
        &builder
            .inputs
            .iter()
            .map(|id| builder.nodes[id.0].name.as_str())
            .join(", "),
    );
    out.push('\n');

    out.push_str("OUTPUT ");
    out.push_str(
        &builder
            .outputs
            .iter()
            .map(|id| builder.nodes[id.0].name.as_str())
            .join(", "),
    );
    out.push('\n');

    out.push_str("VAR ");
    out.push_str(
        &builder
            .inputs
            .iter()
            .chain(builder.equations.iter())
            .map(|id| full_name(&builder.nodes[id.0]))
            .join(", "),
    );
    out.push('\n');

    out.push_str("IN\n");
    for id in &builder.equations {
        equation_line(builder, &builder.nodes[id.0], &mut out)?;
        out.push('\n');
    }

    Ok(out)
}

/// `name` for single wires, `name:width` for buses.
fn full_name(node: &Node) -> String {
    if node.width == 1 {
        node.name.clone()
    } else {
        format!("{}:{}", node.name, node.width)
    }
}

/// The operand's variable name; forward references must be resolved by now.
fn operand_name<'a>(
    builder: &'a NetlistBuilder,
    operand: &Operand,
) -> Result<&'a str, NetlistError> {
    match operand {
        Operand::Signal(signal) => Ok(builder.nodes[signal.id.0].name.as_str()),
        Operand::Forward(forward) => match builder.forwards[forward.id].resolved() {
            Some(id) => Ok(builder.nodes[id.0].name.as_str()),
            None => Err(NetlistError::internal(
                "stringified an unresolved forward reference",
            )),
        },
    }
}

fn equation_line(
    builder: &NetlistBuilder,
    node: &Node,
    out: &mut String,
) -> Result<(), NetlistError> {
    let name = &node.name;
    let line = match &node.kind {
        NodeKind::Input => {
            return Err(NetlistError::internal(
                "input node found in the equation list",
            ));
        }
        NodeKind::Constant(bits) => format!("{name} = {bits}"),
        NodeKind::Unary { op, x } => {
            format!("{name} = {op} {}", operand_name(builder, x)?)
        }
        NodeKind::Binary { op, lhs, rhs } => format!(
            "{name} = {op} {} {}",
            operand_name(builder, lhs)?,
            operand_name(builder, rhs)?
        ),
        NodeKind::Mux { choice, a, b } => format!(
            "{name} = MUX {} {} {}",
            operand_name(builder, choice)?,
            operand_name(builder, a)?,
            operand_name(builder, b)?
        ),
        NodeKind::Rom {
            addr_size,
            word_size,
            read_addr,
        } => format!(
            "{name} = ROM {addr_size} {word_size} {}",
            operand_name(builder, read_addr)?
        ),
        NodeKind::Ram {
            addr_size,
            word_size,
            read_addr,
            write_enable,
            write_addr,
            write_data,
        } => format!(
            "{name} = RAM {addr_size} {word_size} {} {} {} {}",
            operand_name(builder, read_addr)?,
            operand_name(builder, write_enable)?,
            operand_name(builder, write_addr)?,
            operand_name(builder, write_data)?
        ),
        NodeKind::Concat { lhs, rhs } => format!(
            "{name} = CONCAT {} {}",
            operand_name(builder, lhs)?,
            operand_name(builder, rhs)?
        ),
        // The simulator expects an inclusive end index even though the
        // constructor's bounds are exclusive-end.
        NodeKind::Slice { start, end, x } => format!(
            "{name} = SLICE {start} {} {}",
            end - 1,
            operand_name(builder, x)?
        ),
        NodeKind::Select { index, x } => {
            format!("{name} = SELECT {index} {}", operand_name(builder, x)?)
        }
    };
    out.push_str(&line);
    Ok(())
}
