//! Bit-packed per-cell status flags.

use crate::error::StatusError;

/// A fixed-length bit vector with one flag per active cell.
///
/// Cell `i` lives in word `i >> 6` at bit `i & 63`. All bits start
/// cleared. What a set bit means (solid, active, frozen, ...) is up to
/// the consumer; the grid never interprets it.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct StatusBits {
    words: Vec<u64>,
    len: usize,
}

impl StatusBits {
    const BITS_PER_WORD: usize = 64;

    /// Create a cleared bit vector addressing `len` cells.
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(Self::BITS_PER_WORD)],
            len,
        }
    }

    /// Number of addressable cells.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no cells are addressable.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read the flag of cell `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= len()`.
    #[inline]
    pub fn get(&self, idx: usize) -> bool {
        match self.try_get(idx) {
            Ok(bit) => bit,
            Err(e) => panic!("{e}"),
        }
    }

    /// Write the flag of cell `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= len()`.
    #[inline]
    pub fn set(&mut self, idx: usize, value: bool) {
        if let Err(e) = self.try_set(idx, value) {
            panic!("{e}");
        }
    }

    /// Read the flag of cell `idx`, rejecting out-of-range indices.
    #[inline]
    pub fn try_get(&self, idx: usize) -> Result<bool, StatusError> {
        self.check(idx)?;
        Ok((self.words[idx >> 6] >> (idx & 63)) & 1 == 1)
    }

    /// Write the flag of cell `idx`, rejecting out-of-range indices.
    #[inline]
    pub fn try_set(&mut self, idx: usize, value: bool) -> Result<(), StatusError> {
        self.check(idx)?;
        let mask = 1u64 << (idx & 63);
        if value {
            self.words[idx >> 6] |= mask;
        } else {
            self.words[idx >> 6] &= !mask;
        }
        Ok(())
    }

    /// Clear every flag.
    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    /// Number of set flags.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Iterate over the indices of set flags, in ascending order.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(w, &word)| {
            let mut bits = word;
            std::iter::from_fn(move || {
                if bits == 0 {
                    return None;
                }
                let bit = bits.trailing_zeros() as usize;
                bits &= bits - 1;
                Some(w * Self::BITS_PER_WORD + bit)
            })
        })
    }

    /// The packed words, least significant bit first.
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    fn check(&self, idx: usize) -> Result<(), StatusError> {
        if idx < self.len {
            Ok(())
        } else {
            Err(StatusError::OutOfRange {
                index: idx,
                len: self.len,
            })
        }
    }
}

impl Clone for StatusBits {
    fn clone(&self) -> Self {
        Self {
            words: self.words.clone(),
            len: self.len,
        }
    }

    /// Reuses `self`'s word buffer when it is large enough.
    fn clone_from(&mut self, source: &Self) {
        self.words.clone_from(&source.words);
        self.len = source.len;
    }
}
