#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use ripple_netlist::{NetlistBuilder, NetlistError, ShapeError};

#[test]
fn feedback_register_resolves_through_bind() {
    let mut b = NetlistBuilder::new();
    let c_fwd = b.forward(1);
    let o = b.reg(c_fwd).unwrap();
    let c = b.not(o).unwrap();
    b.bind(c_fwd, c).unwrap();
    b.mark_output(o, Some("o")).unwrap();
    b.mark_output(c, Some("c")).unwrap();

    let text = b.serialize().unwrap();
    assert_eq!(text, "INPUT \nOUTPUT o, c\nVAR o, c\nIN\no = REG c\nc = NOT o\n");
}

#[test]
fn bind_checks_the_declared_width() {
    let mut b = NetlistBuilder::new();
    let fwd = b.forward(4);
    let narrow = b.input(2).unwrap();
    let err = b.bind(fwd, narrow).unwrap_err();
    assert!(matches!(
        err,
        NetlistError::Shape(ShapeError::ForwardWidth {
            declared: 4,
            actual: 2,
        })
    ));
}

#[test]
fn a_forward_reference_resolves_exactly_once() {
    let mut b = NetlistBuilder::new();
    let fwd = b.forward(1);
    let x = b.input(1).unwrap();
    b.bind(fwd, x).unwrap();
    assert!(matches!(
        b.bind(fwd, x).unwrap_err(),
        NetlistError::ForwardAlreadyResolved
    ));
    assert!(matches!(
        b.supply(fwd, move |_| Ok(x)).unwrap_err(),
        NetlistError::ForwardAlreadyResolved
    ));
}

#[test]
fn binding_a_supplied_reference_fails() {
    let mut b = NetlistBuilder::new();
    let x = b.input(1).unwrap();
    let fwd = b.defer_with(1, move |_| Ok(x));
    assert!(matches!(
        b.bind(fwd, x).unwrap_err(),
        NetlistError::ForwardAlreadyResolved
    ));
}

#[test]
fn an_unresolved_forward_fails_serialization() {
    let mut b = NetlistBuilder::new();
    let fwd = b.forward(3);
    let o = b.reg(fwd);
    // Multi-bit REG needs ribbon logic; the forward itself is the point.
    assert!(o.is_err());

    let mut b = NetlistBuilder::new();
    let fwd = b.forward(1);
    let o = b.reg(fwd).unwrap();
    b.mark_output(o, None).unwrap();
    let err = b.serialize().unwrap_err();
    assert!(matches!(err, NetlistError::UnresolvedForward { width: 1 }));
}

#[test]
fn suppliers_run_while_draining() {
    let mut b = NetlistBuilder::new();
    let x = b.input_named(1, "x").unwrap();
    let fwd = b.defer_with(1, move |b| b.not(x));
    let o = b.reg(fwd).unwrap();
    b.mark_output(o, Some("o")).unwrap();

    let text = b.serialize().unwrap();
    // The NOT is constructed during the drain, after the REG.
    assert_eq!(
        text,
        "INPUT x\nOUTPUT o\nVAR x, o, _l_1\nIN\no = REG _l_1\n_l_1 = NOT x\n"
    );
}

#[test]
fn draining_iterates_to_a_fixed_point() {
    let mut b = NetlistBuilder::new();
    let outer = b.defer_with(1, |b| {
        let inner = b.defer_with(1, |b| b.constant("1"));
        b.not(inner)
    });
    let o = b.reg(outer).unwrap();
    b.mark_output(o, Some("o")).unwrap();

    let text = b.serialize().unwrap();
    assert_eq!(
        text,
        "INPUT \nOUTPUT o\nVAR o, _l_1, _l_2\nIN\no = REG _l_1\n_l_1 = NOT _l_2\n_l_2 = 1\n"
    );
}

#[test]
fn supplier_width_mismatch_is_a_shape_error() {
    let mut b = NetlistBuilder::new();
    let fwd = b.defer_with(4, |b| b.constant("10"));
    let read_addr = b.input(2).unwrap();
    let write_enable = b.input(1).unwrap();
    let write_addr = b.input(2).unwrap();
    let _stored = b
        .ram(2, 4, read_addr, write_enable, write_addr, fwd)
        .unwrap();
    let err = b.serialize().unwrap_err();
    assert!(matches!(
        err,
        NetlistError::Shape(ShapeError::ForwardWidth {
            declared: 4,
            actual: 2,
        })
    ));
}

#[test]
fn supplier_failures_propagate() {
    let mut b = NetlistBuilder::new();
    let x = b.input(2).unwrap();
    let y = b.input(3).unwrap();
    let fwd = b.defer_with(2, move |b| b.and(x, y));
    let bit = b.select(0, fwd).unwrap();
    let _inv = b.not(bit).unwrap();
    let err = b.serialize().unwrap_err();
    let NetlistError::ForwardFailed(inner) = err else {
        panic!("expected a supplier failure");
    };
    assert!(matches!(
        *inner,
        NetlistError::Shape(ShapeError::WidthMismatch { lhs: 2, rhs: 3 })
    ));
}

#[test]
fn forwards_are_accepted_in_every_operand_position() {
    let mut b = NetlistBuilder::new();
    b.allow_ribbon_logic(true);
    let choice = b.forward(1);
    let a = b.forward(4);
    let alt = b.forward(4);
    let out = b.mux(choice, a, alt).unwrap();
    assert_eq!(out.width(), 4);

    let joined = b.concat(a, alt).unwrap();
    assert_eq!(joined.width(), 8);

    let part = b.slice(1, 3, a).unwrap();
    assert_eq!(part.width(), 2);
    // Forward operands never get derived names.
    assert_eq!(b.name_of(part), "_l_2");

    let bit = b.select(3, a).unwrap();
    assert_eq!(bit.width(), 1);
}
