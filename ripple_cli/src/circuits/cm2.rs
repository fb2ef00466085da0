//! Modulo-2 counter: register feedback through an XOR with the input,
//! with the next-state logic supplied lazily.

use ripple_netlist::{NetlistBuilder, NetlistError};

/// One input `x`, output `r` high every second tick `x` is high.
pub fn build(b: &mut NetlistBuilder) -> Result<(), NetlistError> {
    let x = b.input_named(1, "x")?;
    let next = b.forward(1);
    let s = b.reg(next)?;
    let r = b.and(x, s)?;
    b.mark_output(r, Some("r"))?;
    b.supply(next, move |b| b.xor(x, s))?;
    Ok(())
}
