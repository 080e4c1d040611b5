//! Cross-crate integration tests live under `tests/`; this library is
//! intentionally empty.
