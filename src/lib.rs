//! Markdown dialect conversion through a shared IR
//!
//!     This crate converts text between markdown dialects (GitHub, Obsidian, Notion,
//!     Slack mrkdwn, Discord, Reddit, and friends) by routing every conversion
//!     through a single intermediate representation.
//!
//!     TLDR for dialect authors:
//!         - A dialect never talks to another dialect. parse() produces the IR,
//!           serialize() consumes it, and that is the whole contract.
//!         - Most dialects ride the comrak bridge (./formats/markdown/) and only add
//!           pre/post rewrite passes. Slack is the exception with its own scanner.
//!         - Anything a target dialect cannot represent gets downgraded to the nearest
//!           representable construct with a warning, never an error
//!           (see ./common/downgrade.rs).
//!         - Detection signals are optional; dialects with no distinctive surface
//!           syntax simply return none and lose ties to the default.
//!
//! Architecture
//!
//!     The goal is to split the logic common to all dialect pairs out of the dialects
//!     themselves. The IR (./ir/nodes.rs) is a closed tree of standard markdown nodes
//!     plus the custom kinds dialects need (wikilinks, callouts, spoilers, math...).
//!     The common passes over that tree live in ./common/: callout grammar, regex span
//!     extraction, and custom-node downgrading. Dialect modules stay small and only
//!     deal with their own surface syntax.
//!
//!     This is a pure lib: no std print, no env vars, no filesystem access. Callers
//!     decide what to do with outputs and warnings.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── convert.rs              # parse -> serialize pipeline + input cap
//!     ├── detect.rs               # weighted-signal dialect sniffing
//!     ├── formats
//!     │   ├── markdown            # shared comrak bridge
//!     │   ├── slack               # hand-rolled mrkdwn parser/serializer
//!     │   └── <dialect>.rs        # everything else
//!     ├── ir                      # Intermediate Representation
//!     ├── common                  # shared tree passes
//!     └── warnings.rs             # warning catalog + dedup
//!
//! Lossiness
//!
//!     Dialects differ in expressiveness, so full round tripping is not possible in
//!     general. Converting toward a less expressive dialect is always lossy and the
//!     loss is reported through [`ConversionWarning`]s rather than hidden.

pub mod common;
pub mod convert;
pub mod detect;
pub mod error;
pub mod format;
pub mod formats;
pub mod ir;
pub mod registry;
pub mod warnings;

pub use convert::{convert, ConversionResult, MAX_INPUT_SIZE};
pub use detect::{detect_format, Signal, DEFAULT_FORMAT};
pub use error::FormatError;
pub use format::{Format, ParseResult};
pub use ir::Node;
pub use registry::FormatRegistry;
pub use warnings::{ConversionWarning, Severity};
