//! Unit tests for the points module.

mod domain_tests;
