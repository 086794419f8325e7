//! Dim Info - Typed Debug-Info Views and the Finder
//!
//! This crate interprets the raw node graph of `dim_ir` as debug-information
//! descriptors:
//! - `AnnotatedNode` and the `Di*` views: kind predicates and slot accessors
//!   for compile units, scopes, types, variables and locations
//! - `CrossRef`: direct-or-identifier references, resolved through an
//!   `IdentifierMap` built from the compile units' retained types
//! - `verify()`: local, non-recursive shape checks
//! - `Finder`: collects every compile unit, subprogram, global variable,
//!   type and scope reachable from a program, once each, in discovery order
//! - `DescriptorBuilder`: well-formed descriptor construction
//!
//! # Tracing
//!
//! The finder emits `tracing` events (`debug` per module, `trace` per type).
//! Call [`init_tracing`] and set `RUST_LOG` to see them:
//!
//! ```bash
//! RUST_LOG=dim_info=trace cargo test -p dim_info
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

mod config;
mod construct;
mod cross_ref;
mod display;
mod elements;
mod finder;
mod flags;
mod identifier_map;
mod kind;
mod node;
mod scope;
mod stack;
mod types;
mod variable;
mod verify;

use std::sync::Once;

pub use config::{FinderConfig, IdentifierPolicy};
pub use construct::{
    BasicTypeDesc, CompileUnitDesc, CompositeTypeDesc, DerivedTypeDesc, DescriptorBuilder,
    GlobalVariableDesc, RefDesc, SubprogramDesc, VariableDesc,
};
pub use cross_ref::{CrossRef, RefTarget, ScopeRef, TypeRef};
pub use display::{encoding_name, language_name};
pub use elements::{
    DiArray, DiEnumerator, DiImportedEntity, DiObjCProperty, DiSubrange, DiTemplateTypeParameter,
    DiTemplateValueParameter, PropertyAttributes,
};
pub use finder::Finder;
pub use flags::DebugFlags;
pub use identifier_map::IdentifierMap;
pub use kind::NodeKind;
pub use node::{AnnotatedNode, DescriptorView};
pub use scope::{
    enclosing_subprogram, DiCompileUnit, DiFile, DiLexicalBlock, DiLexicalBlockFile, DiNameSpace,
    DiScope, DiSubprogram, ScopeLike,
};
pub use stack::ensure_sufficient_stack;
pub use types::{
    underlying_composite, DiBasicType, DiCompositeType, DiDerivedType, DiType, TypeLike,
};
pub use variable::{DiGlobalVariable, DiLocation, DiVariable};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing subscriber for debug output.
///
/// Set `RUST_LOG` to control output:
/// - `RUST_LOG=dim_info=debug` - one event per processed module
/// - `RUST_LOG=dim_info=trace` - every recorded type
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
