//! One-bit full adder.

use ripple_netlist::{NetlistBuilder, NetlistError, Signal};

/// Sum and carry of three single wires.
pub fn full_adder(
    b: &mut NetlistBuilder,
    a: Signal,
    x: Signal,
    c: Signal,
) -> Result<(Signal, Signal), NetlistError> {
    let tmp = b.xor(a, x)?;
    let sum = b.xor(tmp, c)?;
    let half_carry = b.and(tmp, c)?;
    let full_carry = b.and(a, x)?;
    let carry = b.or(half_carry, full_carry)?;
    Ok((sum, carry))
}

/// Three 1-bit inputs, outputs `r` (sum) and `out_c` (carry).
pub fn build(b: &mut NetlistBuilder) -> Result<(), NetlistError> {
    let a = b.input_named(1, "a")?;
    let x = b.input_named(1, "b")?;
    let c = b.input_named(1, "c")?;
    let (sum, carry) = full_adder(b, a, x, c)?;
    b.mark_output(sum, Some("r"))?;
    b.mark_output(carry, Some("out_c"))?;
    Ok(())
}
