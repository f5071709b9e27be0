//! Integration test driver for `tests/integration/`.
//!
//! Each `mod` below maps to a file that exercises the controller against
//! mock collaborators or the real driver stack.  All tests run on the host
//! with no hardware required.

#![cfg(not(target_os = "espidf"))]

mod controller_tests;
mod mock_hw;
