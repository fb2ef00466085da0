#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use ripple_cli::circuits;
use ripple_netlist::NetlistBuilder;

#[test]
fn every_builtin_circuit_serializes() {
    for (name, build) in circuits::CIRCUITS {
        let mut b = NetlistBuilder::new();
        build(&mut b).unwrap_or_else(|e| panic!("{name} failed to build: {e}"));
        let text = b
            .serialize()
            .unwrap_or_else(|e| panic!("{name} failed to serialize: {e}"));
        assert!(text.starts_with("INPUT "), "{name} netlist malformed");
        assert!(text.ends_with('\n'), "{name} netlist malformed");
    }
}

#[test]
fn circuit_lookup_is_by_name() {
    assert!(circuits::find("fulladder").is_some());
    assert!(circuits::find("no_such_circuit").is_none());
}

#[test]
fn clockdiv_netlist_is_stable() {
    let mut b = NetlistBuilder::new();
    circuits::clockdiv::build(&mut b).unwrap();
    let text = b.serialize().unwrap();
    let expected = "INPUT \nOUTPUT o\nVAR o, _l_1, _l_2\nIN\no = REG _l_2\n_l_1 = REG o\n_l_2 = NOT _l_1\n";
    assert_eq!(text, expected);
}

#[test]
fn cm2_defers_its_next_state_logic() {
    let mut b = NetlistBuilder::new();
    circuits::cm2::build(&mut b).unwrap();
    let text = b.serialize().unwrap();
    let expected = "\
INPUT x
OUTPUT r
VAR x, _l_0, r, _l_2
IN
_l_0 = REG _l_2
r = AND x _l_0
_l_2 = XOR x _l_0
";
    assert_eq!(text, expected);
}

#[test]
fn fulladder_netlist_is_stable() {
    let mut b = NetlistBuilder::new();
    circuits::fulladder::build(&mut b).unwrap();
    let text = b.serialize().unwrap();
    let expected = "\
INPUT a, b, c
OUTPUT r, out_c
VAR a, b, c, _l_0, r, _l_2, _l_3, out_c
IN
_l_0 = XOR a b
r = XOR _l_0 c
_l_2 = AND _l_0 c
_l_3 = AND a b
out_c = OR _l_2 _l_3
";
    assert_eq!(text, expected);
}
