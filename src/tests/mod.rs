//! Test suite for the composition engine
//!
//! Unit tests live next to the code they cover; this module holds the
//! cross-cutting suites: whole render passes, the standard catalog, custom
//! block types and property-based invariants.
