//! Generation inference over a member snapshot.
//!
//! # Responsibility
//! - Index the snapshot into slot-addressed adjacency lists.
//! - Assign every member a generation level, titled and sorted for display.
//! - Answer relative lookups for the detail view.
//!
//! # Invariants
//! - Every input record appears in exactly one generation band.
//! - Dangling ids, self links and parent cycles never fail a computation.

mod index;
mod lookup;
mod resolver;
mod title;

pub use index::FamilyIndex;
pub use lookup::{MemberDetail, Relatives};
pub(crate) use resolver::ancestry_depths;
pub use resolver::{
    resolve, resolve_as_of, GenerationBand, ResolveMode, TreeLayout, TreeStats, ANCHOR_LEVEL,
    ROOT_LEVEL,
};
pub use title::{generation_title, UNANCHORED_SELF_LEVEL};
