use anyhow::{bail, Context, Result};
use dpa::des;
use dpa::dpa::{target_sbox, Dpa, DpaError};
use dpa::tools;
use dpa::trace::TraceSet;
use ndarray::Axis;
use rayon::prelude::{IntoParallelIterator, ParallelIterator};
use std::env;
use std::path::Path;

/// Acquisitions folded per rayon work item before merging.
const CHUNK: usize = 256;

fn main() -> Result<()> {
    // Before doing anything else, check the correctness of the DES
    // library: a broken cipher would silently poison every statistic.
    if !des::check() {
        bail!("DES functional test failed");
    }

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 && args.len() != 4 {
        bail!(
            "usage: dpa DIR N [B]\n\
             \x20 DIR: directory holding traces.npy and ciphertexts.npy\n\
             \x20 N: number of acquisitions to use\n\
             \x20 B: index of target bit in L15 (1 to 32, as in DES standard, default: 1)"
        );
    }
    let n: usize = args[2].parse().context("invalid number of acquisitions")?;
    if n < 1 {
        bail!("Invalid number of acquisitions: {} (shall be greater than 1)", n);
    }
    let target_bit: u32 = match args.get(3) {
        Some(b) => b.parse().context("invalid target bit index")?,
        None => 1,
    };
    if !(1..=32).contains(&target_bit) {
        bail!("Invalid target bit index: {} (shall be between 1 and 32 included)", target_bit);
    }

    // Read power traces and ciphertexts.
    let set = TraceSet::open(Path::new(&args[1]), n)?;

    // Diagnostic average power trace, plottable with
    // `gnuplot -persist average.cmd`.
    let average = set.average();
    tools::write_dat("average", average.view().insert_axis(Axis(0)), None)?;
    eprintln!("Average power trace stored in file 'average.dat'.");

    // Attack the target bit in L15 = R14 with P. Kocher's DPA technique.
    // Accumulation folds acquisition chunks in parallel and merges the
    // partial processors; the acquisition set itself is only read.
    let bar = tools::progress_bar(set.len());
    let starts: Vec<usize> = (0..set.len()).step_by(CHUNK).collect();
    let processor = starts
        .into_par_iter()
        .try_fold(
            || Dpa::new(set.num_samples(), target_bit),
            |mut acc, start| {
                let end = usize::min(start + CHUNK, set.len());
                for i in start..end {
                    acc.update(set.trace(i), set.ciphertext(i))?;
                }
                bar.inc((end - start) as u64);
                Ok::<_, DpaError>(acc)
            },
        )
        .try_reduce(|| Dpa::new(set.num_samples(), target_bit), |a, b| Ok(a + b))?;
    bar.finish_and_clear();
    let result = processor.finalize();

    // The 64 DPA traces, best guess in red.
    tools::write_dat("dpa", result.traces.view(), Some(result.best_guess))?;
    tools::write_npy("dpa.npy", result.traces.view())?;
    eprintln!("DPA traces stored in files 'dpa.dat' and 'dpa.npy'.");

    eprintln!("Target bit: {}", target_bit);
    eprintln!("Target SBox: {}", target_sbox(target_bit));
    eprintln!("Best guess: {} (0x{:02x})", result.best_guess, result.best_guess);
    eprintln!("Maximum of DPA trace: {:e}", result.best_max);
    eprintln!("Index of maximum in DPA trace: {}", result.best_idx);

    // Machine-readable recovered subkey fragment on standard output.
    eprintln!("Recovered subkey fragment (hex):");
    println!("0x{:02x}", result.best_guess);

    Ok(())
}
