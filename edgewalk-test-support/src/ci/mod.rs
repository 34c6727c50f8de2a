//! Knobs that let CI tune test effort without code changes.

pub mod property_test_profile;
