//! Kinds deterministas para ejercitar el envelope.

pub mod probe;
pub mod sum;

pub use probe::ProbeTask;
pub use sum::SumTask;
