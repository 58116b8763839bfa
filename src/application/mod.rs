// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Workflow coordination only: no model math, no printing of
// CLI help, no direct tensor code.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The full exercise: embedding model + baseline on the validation split
pub mod exercise_use_case;

// Retrain on all data and write a Kaggle submission
pub mod submit_use_case;
