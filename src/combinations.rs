//! Lexicographic "n choose k" index walker.
//!
//! `Combinations` is an explicit cursor: it owns a size-k index buffer and
//! yields it by reference after each successful `advance`. Callers that
//! need to keep a combination copy it out before advancing.

use anyhow::{ensure, Result};
use smallvec::SmallVec;

pub struct Combinations {
    n: usize,
    k: usize,
    indices: SmallVec<[usize; 16]>,
    started: bool,
    done: bool,
}

impl Combinations {
    /// Cursor over all size-`k` subsets of `0..n`, in lexicographic order.
    /// Fails when `k > n`. For `k == 0` (including `n == 0`) the cursor
    /// yields exactly one empty combination.
    pub fn new(n: usize, k: usize) -> Result<Combinations> {
        ensure!(k <= n, "cannot choose {k} items out of {n}");
        Ok(Combinations {
            n,
            k,
            indices: (0..k).collect(),
            started: false,
            done: false,
        })
    }

    /// Step to the next combination. Returns false once exhausted.
    pub fn advance(&mut self) -> bool {
        if self.done {
            return false;
        }
        if !self.started {
            // First combination is [0, 1, .., k-1], prepared at construction.
            self.started = true;
            return true;
        }
        // Rightmost position that can still move.
        let mut i = self.k;
        loop {
            if i == 0 {
                self.done = true;
                return false;
            }
            i -= 1;
            if self.indices[i] < self.n - self.k + i {
                break;
            }
        }
        self.indices[i] += 1;
        for j in (i + 1)..self.k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        true
    }

    /// The current combination. Only valid after `advance` returned true.
    #[inline]
    pub fn current(&self) -> &[usize] {
        debug_assert!(self.started && !self.done);
        &self.indices
    }
}

/// Exact binomial coefficient C(n, k).
pub fn binomial(n: u64, k: u64) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 1..=k {
        // Exact at every step: the running product of i consecutive
        // integers is divisible by i!.
        acc = acc * (n - k + i) as u128 / i as u128;
    }
    acc
}
