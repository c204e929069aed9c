//! Domain services - Pure business logic operations

pub mod stage;

pub use stage::{
    progress_ordinal, resolve_expedition_stage, resolve_stage, BestiaryStage, STAGES_PER_CHAPTER,
};
