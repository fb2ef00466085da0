//! Ripple-carry adder over 4-bit buses, built bit by bit from the one-bit
//! full adder.

use ripple_netlist::{NetlistBuilder, NetlistError, Signal};

use super::fulladder::full_adder;

/// Sum bus and carry-out of two equal-width buses plus a carry-in, summing
/// bits `0..=i`.
fn adder_upto(
    b: &mut NetlistBuilder,
    a: Signal,
    x: Signal,
    c_in: Signal,
    i: u32,
) -> Result<(Signal, Signal), NetlistError> {
    if i == 0 {
        let a0 = b.select(0, a)?;
        let x0 = b.select(0, x)?;
        return full_adder(b, a0, x0, c_in);
    }
    let (low_sum, low_carry) = adder_upto(b, a, x, c_in, i - 1)?;
    let ai = b.select(i, a)?;
    let xi = b.select(i, x)?;
    let (sum_i, carry) = full_adder(b, ai, xi, low_carry)?;
    let sum = b.concat(low_sum, sum_i)?;
    Ok((sum, carry))
}

/// Full-width addition of two buses.
pub fn adder(
    b: &mut NetlistBuilder,
    a: Signal,
    x: Signal,
    c_in: Signal,
) -> Result<(Signal, Signal), NetlistError> {
    adder_upto(b, a, x, c_in, a.width() - 1)
}

/// Two 4-bit inputs and a carry-in; outputs `result` and `out_carry`.
pub fn build(b: &mut NetlistBuilder) -> Result<(), NetlistError> {
    let n = 4;
    let a = b.input_named(n, "a")?;
    let x = b.input_named(n, "b")?;
    let c = b.input_named(1, "c")?;
    let (result, out_carry) = adder(b, a, x, c)?;
    b.mark_output(result, Some("result"))?;
    b.mark_output(out_carry, Some("out_carry"))?;
    Ok(())
}
