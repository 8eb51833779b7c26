//! Booking rules shared by the cinema and rental services.
//!
//! Everything here is pure: callers load the rows, these functions decide.

pub mod admission;
pub mod overlap;
pub mod window;

pub use admission::AdmissionError;
pub use overlap::{does_overlap, is_range_free, ranges_overlap, Screening};
pub use window::{check_screening_slot, within_admission_window, SlotViolation};
