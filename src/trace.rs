//! Acquisition storage: N power traces paired with N 64-bit ciphertexts.
//!
//! On disk an acquisition set is a directory holding `traces.npy`
//! (N x S, `f32`) and `ciphertexts.npy` (N, `u64`). The whole set is
//! loaded up front and is read-only afterwards, so the attack can walk it
//! from any number of worker threads.

use ndarray::{s, Array1, Array2, ArrayView1, Axis};
use ndarray_npy::{ReadNpyError, ReadNpyExt};
use std::error;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

pub const TRACES_FILE: &str = "traces.npy";
pub const CIPHERTEXTS_FILE: &str = "ciphertexts.npy";

#[derive(Debug)]
pub enum TraceError {
    Open(PathBuf, std::io::Error),
    Npy(PathBuf, ReadNpyError),
    /// `traces.npy` and `ciphertexts.npy` disagree on the number of
    /// acquisitions.
    CountMismatch { traces: usize, ciphertexts: usize },
    /// Fewer acquisitions in the files than requested.
    TooFew { requested: usize, available: usize },
    /// Traces with zero samples carry no signal to partition.
    NoSamples,
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceError::Open(path, err) => write!(f, "cannot open {}: {}", path.display(), err),
            TraceError::Npy(path, err) => write!(f, "cannot read {}: {}", path.display(), err),
            TraceError::CountMismatch { traces, ciphertexts } => write!(
                f,
                "acquisition count mismatch: {} traces but {} ciphertexts",
                traces, ciphertexts
            ),
            TraceError::TooFew { requested, available } => write!(
                f,
                "could not read {} acquisitions, files contain {}",
                requested, available
            ),
            TraceError::NoSamples => write!(f, "traces contain no samples"),
        }
    }
}

impl error::Error for TraceError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            TraceError::Open(_, err) => Some(err),
            TraceError::Npy(_, err) => Some(err),
            _ => None,
        }
    }
}

/// An in-memory acquisition set.
pub struct TraceSet {
    traces: Array2<f32>,
    ciphertexts: Array1<u64>,
}

impl TraceSet {
    /// Reads the first `n` acquisitions from `dir`. Errors if the files
    /// cannot supply `n` acquisitions or disagree with each other.
    pub fn open(dir: &Path, n: usize) -> Result<Self, TraceError> {
        let traces_path = dir.join(TRACES_FILE);
        let reader =
            File::open(&traces_path).map_err(|e| TraceError::Open(traces_path.clone(), e))?;
        let traces =
            Array2::<f32>::read_npy(reader).map_err(|e| TraceError::Npy(traces_path, e))?;

        let ct_path = dir.join(CIPHERTEXTS_FILE);
        let reader = File::open(&ct_path).map_err(|e| TraceError::Open(ct_path.clone(), e))?;
        let ciphertexts =
            Array1::<u64>::read_npy(reader).map_err(|e| TraceError::Npy(ct_path, e))?;

        let set = Self::from_parts(traces, ciphertexts)?;
        if set.len() < n {
            return Err(TraceError::TooFew { requested: n, available: set.len() });
        }
        Ok(Self {
            traces: set.traces.slice_move(s![..n, ..]),
            ciphertexts: set.ciphertexts.slice_move(s![..n]),
        })
    }

    /// Builds a set from already loaded arrays. Row i of `traces` pairs
    /// with `ciphertexts[i]`.
    pub fn from_parts(traces: Array2<f32>, ciphertexts: Array1<u64>) -> Result<Self, TraceError> {
        if traces.nrows() != ciphertexts.len() {
            return Err(TraceError::CountMismatch {
                traces: traces.nrows(),
                ciphertexts: ciphertexts.len(),
            });
        }
        if traces.ncols() == 0 {
            return Err(TraceError::NoSamples);
        }
        Ok(Self { traces, ciphertexts })
    }

    /// Number of acquisitions.
    pub fn len(&self) -> usize {
        self.traces.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of samples per trace, the same for every trace of the set.
    pub fn num_samples(&self) -> usize {
        self.traces.ncols()
    }

    pub fn trace(&self, index: usize) -> ArrayView1<f32> {
        self.traces.row(index)
    }

    pub fn ciphertext(&self, index: usize) -> u64 {
        self.ciphertexts[index]
    }

    /// Sample-wise mean over all traces of the set.
    pub fn average(&self) -> Array1<f32> {
        self.traces.sum_axis(Axis(0)) / self.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};
    use ndarray_npy::WriteNpyExt;
    use std::fs;
    use std::io::BufWriter;

    #[test]
    fn from_parts_checks_counts() {
        let traces = arr2(&[[0.0f32, 1.0], [2.0, 3.0]]);
        let cts = arr1(&[1u64, 2, 3]);
        assert!(matches!(
            TraceSet::from_parts(traces, cts),
            Err(TraceError::CountMismatch { traces: 2, ciphertexts: 3 })
        ));
    }

    #[test]
    fn from_parts_rejects_empty_traces() {
        let traces = Array2::<f32>::zeros((2, 0));
        let cts = arr1(&[1u64, 2]);
        assert!(matches!(TraceSet::from_parts(traces, cts), Err(TraceError::NoSamples)));
    }

    #[test]
    fn accessors_and_average() {
        let traces = arr2(&[[0.0f32, 2.0, 4.0], [2.0, 4.0, 0.0]]);
        let cts = arr1(&[0xdead_beefu64, 0x0123_4567]);
        let set = TraceSet::from_parts(traces, cts).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.num_samples(), 3);
        assert_eq!(set.ciphertext(1), 0x0123_4567);
        assert_eq!(set.trace(0)[2], 4.0);
        assert_eq!(set.average(), arr1(&[1.0f32, 3.0, 2.0]));
    }

    #[test]
    fn open_truncates_to_requested_count() {
        let dir = std::env::temp_dir().join(format!("dpa-trace-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let traces = arr2(&[[1.0f32, 2.0], [3.0, 4.0], [5.0, 6.0]]);
        let writer = BufWriter::new(File::create(dir.join(TRACES_FILE)).unwrap());
        traces.write_npy(writer).unwrap();
        let cts = arr1(&[10u64, 20, 30]);
        let writer = BufWriter::new(File::create(dir.join(CIPHERTEXTS_FILE)).unwrap());
        cts.write_npy(writer).unwrap();

        let set = TraceSet::open(&dir, 2).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.ciphertext(1), 20);
        assert_eq!(set.trace(1)[0], 3.0);

        assert!(matches!(
            TraceSet::open(&dir, 4),
            Err(TraceError::TooFew { requested: 4, available: 3 })
        ));

        fs::remove_dir_all(&dir).unwrap();
    }
}
