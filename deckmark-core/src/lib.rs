//! Markdown to positioned text-buffer edits
//!
//!     This crate turns formatted text (markdown, or a plain line-based outline) into the ordered
//!     list of edit operations a remote text container needs to show it: inserts at absolute
//!     offsets, bold/italic style updates over ranges, bullet lists over paragraph ranges, and
//!     optional paragraph indents. The target is an append-only buffer like a Slides text box.
//!
//!     TLDR: For format authors:
//!         - We never parse any format ourselves, but rely on the format's library (comrak for markdown)
//!         - A format only maps its library's AST onto the document tree (./ir/nodes.rs)
//!         - Everything after the tree is format agnostic and lives in ./common
//!
//! Architecture
//!
//!     The pipeline is a chain of pure passes, each owning its own state for one call:
//!
//!         source ──format──▶ Document ──flatten──▶ [StyledRun] ──compile──▶ [EditOp]
//!                ──schedule──▶ [EditOp] (apply order) ──dispatch──▶ Backend
//!
//!     This is a pure lib, that is, it powers the deckmark cli but is shell agnostic: no code
//!     should be written that supposes a shell environment, be it to std print, env vars etc.
//!     Backends take any `io::Write` sink rather than stdout.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── style.rs                # Style tag codec (bitflags)
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── formats
//!     │   ├── markdown            # comrak → Document
//!     │   ├── outline             # line-based outlines → Document
//!     │   └── slides              # EditOp → Slides batchUpdate requests
//!     ├── ir                      # Document tree, styled runs, edit ops
//!     ├── common                  # flatten, compile, schedule
//!     ├── backend                 # Backend trait, dispatch, memory and dry-run backends
//!     ├── deck.rs                 # Presentation structure → per-placeholder edits
//!     └── transforms.rs           # One-call pipeline entry points
//!
//! Testing
//!     tests
//!     ├── lib.rs                  # Module index
//!     └── <area>.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Core Algorithms
//!
//!     The heavy lifting is in ./common/compile.rs: one forward pass over the runs keeps a cursor
//!     (characters inserted so far) and the currently open bullet list. Every offset it emits is
//!     an absolute position in a buffer that only grows, which is why the scheduler may move all
//!     inserts ahead of all styles without recomputing anything.
//!
//!     Nested list items get tab characters in front of their first run; the backend reads those
//!     as nesting depth. The open list's range end is kept short of the injected tabs.
//!
pub mod backend;
pub mod common;
pub mod deck;
pub mod error;
pub mod format;
pub mod formats;
pub mod ir;
pub mod registry;
pub mod style;
pub mod transforms;

pub use backend::{dispatch, Backend, MemoryBackend, SlidesRequestWriter};
pub use common::compile::{compile, compile_replacement, CompileOptions, OffsetUnit, StyleMode};
pub use common::flatten::flatten;
pub use common::schedule::schedule;
pub use error::{BackendError, DispatchError, FormatError, PlanError};
pub use format::Format;
pub use ir::ops::EditOp;
pub use ir::runs::StyledRun;
pub use registry::FormatRegistry;
pub use style::StyleTag;
