//! Differential power analysis of the last DES round, after P. Kocher.
//!
//! For one target bit of L15 and each of the 64 values of the 6-bit subkey
//! feeding the relevant S-box, the acquisitions are split into a zero-set
//! and a one-set according to the predicted bit. The difference of the two
//! set means is the DPA trace of that guess; the guess whose trace shows
//! the highest peak wins.
//!
//! [`Dpa`] is a streaming processor: feed it acquisitions with
//! [`Dpa::update`], merge partial processors with `+`, then call
//! [`Dpa::finalize`]. This makes the accumulation phase a rayon
//! fold/reduce over acquisition chunks, while `finalize` fans out over the
//! 64 independent guesses.

use crate::des::{self, DesError};
use crate::trace::TraceSet;
use ndarray::{Array1, Array2, ArrayView1};
use rayon::prelude::{IntoParallelIterator, ParallelIterator};
use std::error;
use std::fmt;
use std::ops::Add;

/// Number of values of a 6-bit subkey fragment.
pub const GUESS_RANGE: usize = 64;

/// The guess repeated in all eight 6-bit groups of a 48-bit round key:
/// adding this constant per guess keeps every group equal to the guess.
const GUESS_STEP: u64 = 0x0410_4104_1041;

/// The P permutation table, as in the standard. Entry 0 (16) is the
/// position of the first (leftmost) bit of the result in the input 32-bit
/// word. Used to map a target bit index to the S-box that produces it.
const P_TABLE: [u8; 32] = [
    16, 7, 20, 21, 29, 12, 28, 17, 1, 15, 23, 26, 5, 18, 31, 10,
    2, 8, 24, 14, 32, 27, 3, 9, 19, 13, 30, 6, 22, 11, 4, 25,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DpaError {
    /// Target bit index outside 1 to 32.
    TargetBit(u32),
    /// A trace whose length differs from the rest of the run.
    SampleCount { expected: usize, got: usize },
    Cipher(DesError),
}

impl fmt::Display for DpaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DpaError::TargetBit(b) => {
                write!(f, "invalid target bit index: {} (shall be between 1 and 32 included)", b)
            }
            DpaError::SampleCount { expected, got } => {
                write!(f, "trace has {} samples, expected {}", got, expected)
            }
            DpaError::Cipher(err) => write!(f, "cipher error: {}", err),
        }
    }
}

impl error::Error for DpaError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            DpaError::Cipher(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DesError> for DpaError {
    fn from(err: DesError) -> Self {
        DpaError::Cipher(err)
    }
}

/// The S-box (1 to 8) whose output carries bit `target_bit` of L15.
/// `target_bit` must be in 1 to 32.
pub fn target_sbox(target_bit: u32) -> u32 {
    (P_TABLE[target_bit as usize - 1] as u32 - 1) / 4 + 1
}

/// Predicts bit `target_bit` of L15 for all 64 values of the corresponding
/// 6-bit subkey, from one ciphertext.
///
/// `ip(ct)` is R16|L16, the state before the final permutation; its right
/// half L16 equals R15. A synthetic round key with the guess repeated in
/// all eight groups feeds the whole S-box layer, but only the target
/// S-box's output reaches the extracted bit, so the seven wrong groups are
/// harmless.
pub fn decisions(ct: u64, target_bit: u32) -> Result<[u8; GUESS_RANGE], DpaError> {
    if !(1..=32).contains(&target_bit) {
        return Err(DpaError::TargetBit(target_bit));
    }
    let r16l16 = des::ip(ct);
    let l16 = des::right_half(r16l16); // L16 = R15
    let r16 = des::left_half(r16l16);
    let er15 = des::e(l16)?; // E(R15) = E(L16)
    let mut d = [0u8; GUESS_RANGE];
    let mut rk = 0u64;
    for decision in d.iter_mut() {
        let l15 = r16 ^ des::p(des::sboxes(er15 ^ rk)?)?;
        *decision = ((l15 >> (32 - target_bit)) & 1) as u8;
        rk += GUESS_STEP;
    }
    Ok(d)
}

/// Signed maximum sample of a trace and its index. NaN samples never win a
/// comparison, so a partially degenerate trace falls back to its first
/// sample.
pub fn max_with_index(trace: ArrayView1<f32>) -> (f32, usize) {
    if trace.is_empty() {
        return (f32::NAN, 0);
    }
    let mut max = trace[0];
    let mut idx = 0;
    for (i, &v) in trace.iter().enumerate().skip(1) {
        if v > max {
            max = v;
            idx = i;
        }
    }
    (max, idx)
}

/// Streaming DPA processor. One pair of accumulator traces per guess.
pub struct Dpa {
    target_bit: u32,
    len_samples: usize,
    sum0: Array2<f32>,
    sum1: Array2<f32>,
    count0: [u32; GUESS_RANGE],
    count1: [u32; GUESS_RANGE],
}

/// Outcome of a finalized attack.
pub struct DpaResult {
    /// The 64 DPA traces, one row per guess: one-set mean minus zero-set
    /// mean. A guess with an empty set yields an all-NaN row.
    pub traces: Array2<f32>,
    /// Per guess, the signed maximum sample and its index.
    pub peaks: Vec<(f32, usize)>,
    /// Guess with the highest peak. Guess 0 wins exact ties.
    pub best_guess: usize,
    pub best_max: f32,
    pub best_idx: usize,
}

impl Dpa {
    pub fn new(len_samples: usize, target_bit: u32) -> Self {
        Self {
            target_bit,
            len_samples,
            sum0: Array2::zeros((GUESS_RANGE, len_samples)),
            sum1: Array2::zeros((GUESS_RANGE, len_samples)),
            count0: [0; GUESS_RANGE],
            count1: [0; GUESS_RANGE],
        }
    }

    /// Routes one acquisition into the zero-set or one-set accumulator of
    /// every guess, according to the predicted target bit.
    pub fn update(&mut self, trace: ArrayView1<f32>, ciphertext: u64) -> Result<(), DpaError> {
        if trace.len() != self.len_samples {
            return Err(DpaError::SampleCount { expected: self.len_samples, got: trace.len() });
        }
        let d = decisions(ciphertext, self.target_bit)?;
        for (g, &decision) in d.iter().enumerate() {
            if decision == 0 {
                self.sum0.row_mut(g).zip_mut_with(&trace, |acc, &s| *acc += s);
                self.count0[g] += 1;
            } else {
                self.sum1.row_mut(g).zip_mut_with(&trace, |acc, &s| *acc += s);
                self.count1[g] += 1;
            }
        }
        Ok(())
    }

    /// Turns the accumulators into the 64 DPA traces and picks the best
    /// guess. The per-guess work is independent and runs in parallel; the
    /// best-of-64 reduction is sequential so that the first-seen guess
    /// wins ties, guess 0 first.
    ///
    /// Guess 0 seeds the best unconditionally, as in Kocher's original
    /// loop. If guess 0 has an empty partition its NaN peak sticks: no
    /// `max > NaN` comparison succeeds, and the run reports guess 0 even
    /// when later guesses show real peaks. Callers wanting a different
    /// policy can rescan [`DpaResult::peaks`].
    pub fn finalize(self) -> DpaResult {
        let per_guess: Vec<(Array1<f32>, f32, usize)> = (0..GUESS_RANGE)
            .into_par_iter()
            .map(|g| {
                // An empty set divides zero by zero: the NaN propagates to
                // the DPA trace instead of aborting the run.
                let mean0 = self.sum0.row(g).mapv(|v| v / self.count0[g] as f32);
                let mean1 = self.sum1.row(g).mapv(|v| v / self.count1[g] as f32);
                let diff = mean1 - mean0;
                let (max, idx) = max_with_index(diff.view());
                (diff, max, idx)
            })
            .collect();

        let mut traces = Array2::zeros((GUESS_RANGE, self.len_samples));
        let mut peaks = Vec::with_capacity(GUESS_RANGE);
        let mut best_guess = 0;
        let mut best_max = 0.0f32;
        let mut best_idx = 0;
        for (g, (diff, max, idx)) in per_guess.into_iter().enumerate() {
            // Signed comparison, deliberately: only a positive-going peak
            // is ever detected. Strictly greater, so guess 0 seeds the
            // best and wins exact ties.
            if max > best_max || g == 0 {
                best_max = max;
                best_idx = idx;
                best_guess = g;
            }
            traces.row_mut(g).assign(&diff);
            peaks.push((max, idx));
        }
        DpaResult { traces, peaks, best_guess, best_max, best_idx }
    }
}

/// Merges two partial processors over the same run parameters, so the
/// accumulation phase can fold/reduce over acquisition chunks.
impl Add for Dpa {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let mut count0 = self.count0;
        let mut count1 = self.count1;
        for g in 0..GUESS_RANGE {
            count0[g] += rhs.count0[g];
            count1[g] += rhs.count1[g];
        }
        Self {
            target_bit: rhs.target_bit,
            len_samples: rhs.len_samples,
            sum0: self.sum0 + rhs.sum0,
            sum1: self.sum1 + rhs.sum1,
            count0,
            count1,
        }
    }
}

/// Sequential convenience: runs the whole attack over an acquisition set.
pub fn run(set: &TraceSet, target_bit: u32) -> Result<DpaResult, DpaError> {
    let mut dpa = Dpa::new(set.num_samples(), target_bit);
    for i in 0..set.len() {
        dpa.update(set.trace(i), set.ciphertext(i))?;
    }
    Ok(dpa.finalize())
}
