//! Aggregates - Root objects that enforce consistency invariants

mod campaign;

pub use campaign::{AddActiveOutcome, Campaign, MemberMeta};
