//! Differential power analysis against the last round of DES.
//!
//! The crate splits into a bit-exact cipher ([`des`]), the attack engine
//! ([`dpa`]), acquisition storage ([`trace`]) and export helpers
//! ([`tools`]). The `dpa` binary ties them together: it self-checks the
//! cipher, loads N (ciphertext, trace) acquisitions, ranks the 64 values
//! of the targeted 6-bit subkey fragment and reports the winner.

pub mod des;
pub mod dpa;
pub mod tools;
pub mod trace;
