/*!
# Scrubbing and constant-time helpers

Arena regions, instance snapshots and checkpoint blobs all hold hash
state, which for keyed constructions built on top of this crate is
secret. Everything that holds such bytes implements [`Scrubbed`].
*/

use std::ptr;

/// Types implementing this can be scrubbed, the memory is cleared and
/// erased with zeroes.
pub trait Scrubbed {
    fn scrub(&mut self);
}

/// Perform a secure memset. This function is guaranteed not to be elided
/// or reordered.
///
/// # Safety
///
/// The destination memory (`dst` to `dst+count`) must be properly allocated
/// and ready to use.
#[inline(never)]
pub unsafe fn memset(dst: *mut u8, val: u8, count: usize) {
    for i in 0..count {
        ptr::write_volatile(dst.add(i), val);
    }
}

/// compare the equality of the 2 given arrays, constant in time
///
/// # Panics
///
/// The function will panic if it is called with a `len` of 0.
///
/// # Safety
///
/// Expecting to have both valid pointer and the count to fit in
/// both the allocated memories
#[inline(never)]
pub unsafe fn memeq(v1: *const u8, v2: *const u8, len: usize) -> bool {
    let mut sum = 0;

    assert!(
        len != 0,
        "Cannot perform equality comparison if the length is 0"
    );

    for i in 0..len {
        let val1 = ptr::read_volatile(v1.add(i));
        let val2 = ptr::read_volatile(v2.add(i));

        sum |= val1 ^ val2;
    }

    sum == 0
}

/// Slice equality in time depending only on the lengths.
pub fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    if a.is_empty() {
        return true;
    }

    // SAFETY: both slices are valid for `a.len()` bytes
    unsafe { memeq(a.as_ptr(), b.as_ptr(), a.len()) }
}

impl Scrubbed for [u8] {
    fn scrub(&mut self) {
        // SAFETY: the slice is valid for writes of its own length
        unsafe { memset(self.as_mut_ptr(), 0, self.len()) }
    }
}

impl<const N: usize> Scrubbed for [u8; N] {
    fn scrub(&mut self) {
        self.as_mut_slice().scrub()
    }
}

impl Scrubbed for Vec<u8> {
    fn scrub(&mut self) {
        self.as_mut_slice().scrub()
    }
}

impl<T: Scrubbed + ?Sized> Scrubbed for Box<T> {
    fn scrub(&mut self) {
        (**self).scrub()
    }
}

impl<T: Scrubbed> Scrubbed for Option<T> {
    fn scrub(&mut self) {
        if let Some(inner) = self.as_mut() {
            inner.scrub()
        }
    }
}
