// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All burn model code lives here:
//
//   model.rs      — embedding → average pooling → sigmoid unit
//   trainer.rs    — Adam + binary cross-entropy training loop
//                   with per-epoch validation
//   predictor.rs  — batched probability prediction and the
//                   0.5 rounding to labels
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)

/// Embedding classifier architecture
pub mod model;

/// Training loop with validation
pub mod trainer;

/// Batched inference over raw sentences
pub mod predictor;
