pub mod features;
pub mod model;
pub mod projector;
pub mod translator;

pub use features::{
    FeatureMatrix, PostTryState, ProjectionReport, TryOutcome, FEATURE_COLUMNS,
    FEATURE_SCHEMA_VERSION,
};
pub use model::{ModelError, PrecomputedModel, ProbabilityModel};
pub use projector::project;
pub use translator::{evaluate, translate, WinProbabilityResult, MAX_LEADER_WP};
