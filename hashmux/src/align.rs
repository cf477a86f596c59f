//! Offset arithmetic inside the arena.
//!
//! Every derived offset (state base, input staging, digest and checkpoint
//! results) is rounded up to a 16-byte boundary. Nothing outside this module
//! and [`crate::checkout`] computes raw arena offsets.

/// Boundary every arena offset is aligned to.
pub const ALIGNMENT: usize = 16;

/// Round `value` up to the next multiple of [`ALIGNMENT`].
///
/// Returns `None` instead of wrapping when the rounded value does not fit in
/// a `usize`.
#[inline]
pub const fn align_up16(value: usize) -> Option<usize> {
    match value.checked_add(ALIGNMENT - 1) {
        Some(v) => Some(v & !(ALIGNMENT - 1)),
        None => None,
    }
}

/// Staging offset that follows a state region of `state_size` bytes placed
/// at `state_base`.
#[inline]
pub(crate) const fn staging_offset(state_base: usize, state_size: usize) -> Option<usize> {
    match state_base.checked_add(state_size) {
        Some(end) => align_up16(end),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn rounds_to_boundary() {
        assert_eq!(align_up16(0), Some(0));
        assert_eq!(align_up16(1), Some(16));
        assert_eq!(align_up16(15), Some(16));
        assert_eq!(align_up16(16), Some(16));
        assert_eq!(align_up16(17), Some(32));
        assert_eq!(align_up16(113), Some(128));
        assert_eq!(align_up16(209), Some(224));
    }

    #[test]
    fn overflow_is_reported() {
        assert_eq!(align_up16(usize::MAX), None);
        assert_eq!(align_up16(usize::MAX - 14), None);
        assert_eq!(staging_offset(usize::MAX, 1), None);
    }

    #[test]
    fn staging_follows_state() {
        assert_eq!(staging_offset(0, 113), Some(128));
        assert_eq!(staging_offset(16, 209), Some(240));
    }

    #[quickcheck]
    fn aligned_and_minimal(value: u32) -> bool {
        let value = value as usize;
        let aligned = align_up16(value).unwrap_or_default();
        aligned % ALIGNMENT == 0 && aligned >= value && aligned - value < ALIGNMENT
    }
}
