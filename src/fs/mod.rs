//! Filesystem utilities for ttnconf.
//!
//! Settings are persisted by replacing the whole file, so the only primitive
//! needed is an atomic whole-file write.

pub mod atomic;

pub use atomic::atomic_write_file;
