//! Clock divider: a register looped through a second register and an
//! inverter, expressed with an explicitly bound forward reference.

use ripple_netlist::{NetlistBuilder, NetlistError};

/// No inputs, one output `o` toggling every other tick.
pub fn build(b: &mut NetlistBuilder) -> Result<(), NetlistError> {
    let c_fwd = b.forward(1);
    let o = b.reg(c_fwd)?;
    let delayed = b.reg(o)?;
    let c = b.not(delayed)?;
    b.bind(c_fwd, c)?;
    b.mark_output(o, Some("o"))?;
    Ok(())
}
