//! Incremental hash state and its two byte encodings.
//!
//! The *working* encoding is what lives in a caller's state region between
//! primitive calls:
//!
//! ```text
//! [0 .. C)            chaining words, native endianness
//! [C .. C+B)          block buffer
//! [C+B]               buffered byte count
//! [C+B+1 .. C+B+17)   total absorbed bytes, u128 little-endian
//! ```
//!
//! The *checkpoint* encoding is the portable one handed out by `serialize`,
//! all big-endian:
//!
//! ```text
//! [0 .. C)            chaining words
//! [C .. C+B)          block buffer
//! [C+B]               buffered byte count
//! [C+B+1 .. C+B+1+L)  total absorbed bytes (L = 8 or 16)
//! ```
//!
//! which is 105 bytes for SHA-224/256 and 209 bytes for the 64-bit family.

use crate::family::{Family, Word};

const MAX_BLOCK: usize = 128;
const TOTAL_LEN_BYTES: usize = 16;

pub(crate) struct HashState<F: Family> {
    h: [F::Word; 8],
    buffer: [u8; MAX_BLOCK],
    buffer_len: usize,
    total_len: u128,
}

impl<F: Family> HashState<F> {
    /// Size of the working encoding.
    pub const SIZE: usize = F::CHAINING_BYTES + F::BLOCK_BYTES + 1 + TOTAL_LEN_BYTES;

    /// Size of the checkpoint encoding.
    pub const CHECKPOINT_SIZE: usize = F::CHAINING_BYTES + F::BLOCK_BYTES + 1 + F::LEN_BYTES;

    pub fn new(iv: [F::Word; 8]) -> Self {
        Self {
            h: iv,
            buffer: [0u8; MAX_BLOCK],
            buffer_len: 0,
            total_len: 0,
        }
    }

    /// Decode the working encoding. `src` must hold at least [`Self::SIZE`]
    /// bytes.
    pub fn load(src: &[u8]) -> Self {
        let width = <F::Word as Word>::BYTES;
        let mut h = [F::Word::default(); 8];
        for (i, word) in h.iter_mut().enumerate() {
            *word = F::Word::read_ne(&src[i * width..]);
        }

        let mut offset = F::CHAINING_BYTES;
        let mut buffer = [0u8; MAX_BLOCK];
        buffer[..F::BLOCK_BYTES].copy_from_slice(&src[offset..offset + F::BLOCK_BYTES]);
        offset += F::BLOCK_BYTES;

        // a corrupted count must never index past the block
        let buffer_len = (src[offset] as usize).min(F::BLOCK_BYTES - 1);
        offset += 1;

        let mut total = [0u8; TOTAL_LEN_BYTES];
        total.copy_from_slice(&src[offset..offset + TOTAL_LEN_BYTES]);

        Self {
            h,
            buffer,
            buffer_len,
            total_len: u128::from_le_bytes(total),
        }
    }

    /// Encode into the working encoding. `dst` must hold at least
    /// [`Self::SIZE`] bytes.
    pub fn store(&self, dst: &mut [u8]) {
        let width = <F::Word as Word>::BYTES;
        for (i, word) in self.h.iter().enumerate() {
            word.write_ne(&mut dst[i * width..]);
        }

        let mut offset = F::CHAINING_BYTES;
        dst[offset..offset + F::BLOCK_BYTES].copy_from_slice(&self.buffer[..F::BLOCK_BYTES]);
        offset += F::BLOCK_BYTES;

        dst[offset] = self.buffer_len as u8;
        offset += 1;

        dst[offset..offset + TOTAL_LEN_BYTES].copy_from_slice(&self.total_len.to_le_bytes());
    }

    pub fn update(&mut self, data: &[u8]) {
        let block = F::BLOCK_BYTES;
        self.total_len = self.total_len.wrapping_add(data.len() as u128);
        let mut offset = 0;

        if self.buffer_len > 0 {
            let needed = block - self.buffer_len;
            if data.len() < needed {
                self.buffer[self.buffer_len..self.buffer_len + data.len()].copy_from_slice(data);
                self.buffer_len += data.len();
                return;
            }

            self.buffer[self.buffer_len..block].copy_from_slice(&data[..needed]);
            F::compress(&mut self.h, &self.buffer[..block]);
            self.buffer_len = 0;
            offset = needed;
        }

        while offset + block <= data.len() {
            F::compress(&mut self.h, &data[offset..offset + block]);
            offset += block;
        }

        let remaining = data.len() - offset;
        if remaining > 0 {
            self.buffer[..remaining].copy_from_slice(&data[offset..]);
            self.buffer_len = remaining;
        }
    }

    /// Pad, compress the final block(s) and write the leading `out.len()`
    /// bytes of the chaining state. The state is consumed: absorbing more
    /// data afterwards without a reset yields a meaningless digest.
    pub fn finalize(&mut self, out: &mut [u8]) {
        let block = F::BLOCK_BYTES;
        let pad_threshold = block - F::LEN_BYTES;

        self.buffer[self.buffer_len] = 0x80;
        self.buffer_len += 1;

        if self.buffer_len > pad_threshold {
            self.buffer[self.buffer_len..block].fill(0);
            F::compress(&mut self.h, &self.buffer[..block]);
            self.buffer_len = 0;
        }

        self.buffer[self.buffer_len..pad_threshold].fill(0);
        let bits = self.total_len.wrapping_shl(3).to_be_bytes();
        self.buffer[pad_threshold..block].copy_from_slice(&bits[TOTAL_LEN_BYTES - F::LEN_BYTES..]);
        F::compress(&mut self.h, &self.buffer[..block]);

        let width = <F::Word as Word>::BYTES;
        let mut full = [0u8; 64];
        for (i, word) in self.h.iter().enumerate() {
            word.write_be(&mut full[i * width..]);
        }
        out.copy_from_slice(&full[..out.len()]);
    }

    /// Encode into the checkpoint encoding. `dst` must hold at least
    /// [`Self::CHECKPOINT_SIZE`] bytes.
    pub fn export(&self, dst: &mut [u8]) {
        let width = <F::Word as Word>::BYTES;
        for (i, word) in self.h.iter().enumerate() {
            word.write_be(&mut dst[i * width..]);
        }

        let mut offset = F::CHAINING_BYTES;
        dst[offset..offset + F::BLOCK_BYTES].copy_from_slice(&self.buffer[..F::BLOCK_BYTES]);
        offset += F::BLOCK_BYTES;

        dst[offset] = self.buffer_len as u8;
        offset += 1;

        let total = self.total_len.to_be_bytes();
        dst[offset..offset + F::LEN_BYTES].copy_from_slice(&total[TOTAL_LEN_BYTES - F::LEN_BYTES..]);
    }

    /// Decode a checkpoint, rejecting anything of the wrong length or with
    /// an impossible buffered byte count.
    pub fn import(src: &[u8]) -> Option<Self> {
        if src.len() != Self::CHECKPOINT_SIZE {
            return None;
        }

        let width = <F::Word as Word>::BYTES;
        let mut h = [F::Word::default(); 8];
        for (i, word) in h.iter_mut().enumerate() {
            *word = F::Word::read_be(&src[i * width..]);
        }

        let mut offset = F::CHAINING_BYTES;
        let mut buffer = [0u8; MAX_BLOCK];
        buffer[..F::BLOCK_BYTES].copy_from_slice(&src[offset..offset + F::BLOCK_BYTES]);
        offset += F::BLOCK_BYTES;

        let buffer_len = src[offset] as usize;
        if buffer_len >= F::BLOCK_BYTES {
            return None;
        }
        offset += 1;

        let mut total = [0u8; TOTAL_LEN_BYTES];
        total[TOTAL_LEN_BYTES - F::LEN_BYTES..].copy_from_slice(&src[offset..offset + F::LEN_BYTES]);

        Some(Self {
            h,
            buffer,
            buffer_len,
            total_len: u128::from_be_bytes(total),
        })
    }
}
