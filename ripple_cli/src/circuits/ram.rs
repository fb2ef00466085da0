//! RAM whose write port stores the bitwise OR of the fresh input with the
//! word just read, with the write data supplied lazily since it depends on
//! the RAM's own output.

use ripple_netlist::{NetlistBuilder, NetlistError, Signal};

/// Bitwise OR over two equal-width buses, one wire at a time.
fn or_n(b: &mut NetlistBuilder, a: Signal, x: Signal) -> Result<Signal, NetlistError> {
    if a.width() == 1 {
        return b.or(a, x);
    }
    let a0 = b.select(0, a)?;
    let x0 = b.select(0, x)?;
    let low = b.or(a0, x0)?;
    let a_rest = b.slice(1, a.width(), a)?;
    let x_rest = b.slice(1, x.width(), x)?;
    let rest = or_n(b, a_rest, x_rest)?;
    b.concat(low, rest)
}

/// A 4-word by 4-bit RAM accumulating ORs of its input; output `o`.
pub fn build(b: &mut NetlistBuilder) -> Result<(), NetlistError> {
    let addr_size = 2;
    let word_size = 4;
    let read_addr = b.input_named(addr_size, "read_addr")?;
    let write_enable = b.input_named(1, "write_enable")?;
    let write_addr = b.input_named(addr_size, "write_addr")?;
    let write_data = b.input_named(word_size, "input_write_data")?;
    let data_fwd = b.forward(word_size);
    let o = b.ram(
        addr_size,
        word_size,
        read_addr,
        write_enable,
        write_addr,
        data_fwd,
    )?;
    b.supply(data_fwd, move |b| or_n(b, write_data, o))?;
    b.mark_output(o, Some("o"))?;
    Ok(())
}
