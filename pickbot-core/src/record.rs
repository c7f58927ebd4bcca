//! Types and traits for recording diagnostics of environment interaction.
//!
//! Every [`Env::step`](crate::Env::step) returns a [`Record`] next to the
//! [`Step`](crate::Step) object. Drivers can pass these records to a
//! [`Recorder`], e.g. a [`BufferedRecorder`] during evaluation runs.
//!
//! ```rust
//! use pickbot_core::record::{Record, RecordValue};
//!
//! let mut record = Record::empty();
//! record.insert("step", RecordValue::Scalar(1.0));
//! record.insert("reward", RecordValue::Scalar(-0.01));
//! assert_eq!(record.get_scalar("step").unwrap(), 1.0);
//! ```
mod base;
mod buffered_recorder;
mod recorder;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use recorder::Recorder;
