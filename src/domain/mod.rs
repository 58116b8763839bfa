// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs and traits describing the exercise data.
// No burn, ndarray or file I/O in here.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// A tweet row and the aligned train/validation split
pub mod tweet;

// Core abstractions that other layers implement
pub mod traits;
