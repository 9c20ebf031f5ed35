pub mod fairness_scorer;
pub mod priority_resolver;
pub mod rotation_assigner;
pub mod text_extractor;

pub use fairness_scorer::{FairnessScorer, ScoreBreakdown, ScoreCard};
pub use priority_resolver::PriorityResolver;
pub use rotation_assigner::{
    rank_candidates, select_candidate, Assignment, RotationAssigner, RotationResult,
};
pub use text_extractor::TextExtractor;
