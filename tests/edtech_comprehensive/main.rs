//! EdTech Ledger Comprehensive Tests
//!
//! End-to-end behavior of the contract over the in-process host: registry
//! semantics, record format, invocation atomicity and concurrent submits.


mod atomicity_tests;
mod record_format_tests;
mod registry_semantics_tests;
mod scenario_tests;
