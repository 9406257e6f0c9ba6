//! Test-only helpers shared by unit tests.

pub(crate) mod log_capture;
pub(crate) mod socket_guard;
