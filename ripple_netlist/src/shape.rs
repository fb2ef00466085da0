//! Width and bounds rules shared by the node constructors.
//!
//! Pure checks only; callers run every rule relevant to a node before
//! touching the name table or the graph collections, so a failed
//! construction leaves no partial registration behind.

use crate::error::ShapeError;

/// Both operands of a binary node must have the same bus width.
pub(crate) fn same_width(lhs: u32, rhs: u32) -> Result<(), ShapeError> {
    if lhs == rhs {
        Ok(())
    } else {
        Err(ShapeError::WidthMismatch { lhs, rhs })
    }
}

/// A port with a fixed width requirement (mux choice, memory ports).
pub(crate) fn port_width(port: &'static str, expected: u32, actual: u32) -> Result<(), ShapeError> {
    if actual == expected {
        Ok(())
    } else {
        Err(ShapeError::PortWidth {
            port,
            expected,
            actual,
        })
    }
}

/// Logic gates take single wires unless ribbon logic is enabled.
pub(crate) fn ribbon_gate(allowed: bool, op: &'static str, width: u32) -> Result<(), ShapeError> {
    if allowed || width == 1 {
        Ok(())
    } else {
        Err(ShapeError::RibbonRequired { op, width })
    }
}

/// Slice bounds are exclusive-end: `0 <= start < end <= width`.
pub(crate) fn slice_bounds(start: u32, end: u32, width: u32) -> Result<(), ShapeError> {
    if start < end && end <= width {
        Ok(())
    } else {
        Err(ShapeError::SliceBounds { start, end, width })
    }
}

/// Select takes a single bit: `0 <= index < width`.
pub(crate) fn select_index(index: u32, width: u32) -> Result<(), ShapeError> {
    if index < width {
        Ok(())
    } else {
        Err(ShapeError::SelectIndex { index, width })
    }
}

/// Constants are non-empty strings over `0`, `1`, `t`, `f`.
pub(crate) fn constant_bits(value: &str) -> Result<(), ShapeError> {
    if value.is_empty() {
        return Err(ShapeError::EmptyConstant);
    }
    match value.chars().find(|c| !matches!(c, '0' | '1' | 't' | 'f')) {
        Some(found) => Err(ShapeError::ConstantChar {
            found,
            value: value.to_owned(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_bounds_reject_empty_and_overlong() {
        assert!(slice_bounds(0, 2, 4).is_ok());
        assert!(slice_bounds(3, 4, 4).is_ok());
        assert!(matches!(
            slice_bounds(2, 2, 4),
            Err(ShapeError::SliceBounds { .. })
        ));
        assert!(matches!(
            slice_bounds(3, 2, 4),
            Err(ShapeError::SliceBounds { .. })
        ));
        assert!(matches!(
            slice_bounds(0, 5, 4),
            Err(ShapeError::SliceBounds { .. })
        ));
    }

    #[test]
    fn select_index_is_exclusive_of_width() {
        assert!(select_index(3, 4).is_ok());
        assert!(matches!(
            select_index(4, 4),
            Err(ShapeError::SelectIndex { .. })
        ));
    }

    #[test]
    fn ribbon_gate_lifts_single_bit_restriction() {
        assert!(ribbon_gate(false, "AND", 1).is_ok());
        assert!(matches!(
            ribbon_gate(false, "AND", 8),
            Err(ShapeError::RibbonRequired { op: "AND", width: 8 })
        ));
        assert!(ribbon_gate(true, "AND", 8).is_ok());
    }

    #[test]
    fn constant_alphabet() {
        assert!(constant_bits("01tf").is_ok());
        assert!(matches!(constant_bits(""), Err(ShapeError::EmptyConstant)));
        assert!(matches!(
            constant_bits("012"),
            Err(ShapeError::ConstantChar { found: '2', .. })
        ));
    }
}
