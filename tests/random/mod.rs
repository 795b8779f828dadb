//! Integration tests for the random source

mod random_source_tests;
