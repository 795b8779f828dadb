//! Integration tests for minimization results
//!
//! These tests cover covariance updates, error extraction, random parameter
//! draws and the text report.

mod sampling_tests;
