//! Dim IR - Metadata Graph Storage
//!
//! This crate contains the raw storage layer for debug-information metadata:
//! - Interned strings (`Name`) for node string slots and type identifiers
//! - `NodeId` handles into a flat node arena
//! - `Slot`/`GraphNode`: ordered, typed, immutable node records
//! - DWARF `Tag` values and the versioned tag word
//! - `GraphBuilder` for construction (uniqued, distinct and forward nodes)
//! - `Program`: compile-unit roots plus per-instruction debug attachments
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: Strings → `Name(u32)`, uniqued nodes → `NodeId(u32)`
//! - **Flatten Everything**: node references are indices, never `Box`/`Rc`
//! - **Build, then freeze**: a `MetadataGraph` is immutable once built, so any
//!   number of readers may share it
//!
//! Nothing here knows what a slot *means*. Interpreting slot positions by tag
//! is the job of `dim_info`.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod builder;
mod error;
mod graph;
mod interner;
mod name;
mod node_id;
mod program;
mod slot;
mod tag;

pub use builder::GraphBuilder;
pub use error::GraphError;
pub use graph::{GraphNode, MetadataGraph};
pub use interner::StringInterner;
pub use name::Name;
pub use node_id::NodeId;
pub use program::{DebugIntrinsic, Function, Instruction, Program};
pub use slot::Slot;
pub use tag::{Tag, VERSION_MASK, VERSION_WORD};

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Name, NodeId, Slot};
    static_assert_size!(Name, 4);
    static_assert_size!(NodeId, 4);
    // Largest payload is u64/i64; discriminant pads to 16.
    static_assert_size!(Slot, 16);
}
