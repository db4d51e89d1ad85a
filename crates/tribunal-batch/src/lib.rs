//! # tribunal-batch
//!
//! Runs many cases through independent trials and tabulates the verdicts.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tribunal_batch::{io, BatchRunner, BatchSettings};
//!
//! let cases = io::read_cases(Path::new("test.csv"))?;
//! let runner = BatchRunner::new(provider, BatchSettings::from_config(&config));
//! let results = runner.run_batch(cases).await;
//! io::write_verdicts(Path::new("submission.csv"), &results)?;
//! ```

pub mod io;
pub mod result;
pub mod runner;

pub use result::{verdicts, CaseResult, Tally};
pub use runner::{BatchRunner, BatchSettings};
