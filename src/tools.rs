//! Export helpers and progress reporting.

use indicatif::{ProgressBar, ProgressStyle};
use ndarray::ArrayView2;
use ndarray_npy::{WriteNpyError, WriteNpyExt};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Duration;

/// Writes a 2-D array of trace samples to an `.npy` file.
pub fn write_npy(path: &str, ar: ArrayView2<f32>) -> Result<(), WriteNpyError> {
    let writer = BufWriter::new(File::create(path)?);
    ar.write_npy(writer)
}

/// Writes one trace per row of `traces` into `<prefix>.dat` (sample index
/// first, then one column per trace) and a matching gnuplot script into
/// `<prefix>.cmd`. `highlighted` selects a distinguished trace, plotted in
/// red with its guess value as title; plot with:
/// `gnuplot -persist <prefix>.cmd`.
pub fn write_dat(
    prefix: &str,
    traces: ArrayView2<f32>,
    highlighted: Option<usize>,
) -> io::Result<()> {
    let dat = format!("{}.dat", prefix);
    let mut w = BufWriter::new(File::create(&dat)?);
    for i in 0..traces.ncols() {
        write!(w, "{}", i)?;
        for j in 0..traces.nrows() {
            write!(w, " {:e}", traces[[j, i]])?;
        }
        writeln!(w)?;
    }
    w.flush()?;

    let mut c = BufWriter::new(File::create(format!("{}.cmd", prefix))?);
    writeln!(c, "set grid")?;
    write!(c, "plot ")?;
    for j in 0..traces.nrows() {
        if j > 0 {
            write!(c, ", ")?;
        }
        if highlighted == Some(j) {
            write!(
                c,
                "'{}' using 1:{} with lines lc rgb 'red' title 'Trace {} (0x{:02x})'",
                dat,
                j + 2,
                j,
                j
            )?;
        } else {
            write!(c, "'{}' using 1:{} with lines lc rgb 'blue' notitle", dat, j + 2)?;
        }
    }
    writeln!(c)?;
    c.flush()
}

/// Creates a [`ProgressBar`] with a predefined default style.
pub fn progress_bar(len: usize) -> ProgressBar {
    let progress_bar = ProgressBar::new(len as u64).with_style(
        ProgressStyle::with_template("{elapsed_precise} {wide_bar} {pos}/{len} ({eta})").unwrap(),
    );
    progress_bar.enable_steady_tick(Duration::new(0, 100000000));
    progress_bar
}
