//! Domain models for class schedules.

mod subject;

pub use subject::{Day, Modality, Subject, TimeRange};
