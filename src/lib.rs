//! # fsal-attachments
//!
//! Attachment descriptors for the file-system abstraction layer (FSAL) of a
//! document-management tool.
//!
//! Attachments are the files in a workspace that are not documents: images,
//! PDFs, archives. Each one is tracked as a child of its directory node with
//! a small descriptor of on-disk facts.
//!
//! ## Lifecycle
//!
//! ```text
//!            build()                 reparse()
//!  path ───────────────▶ Descriptor ◀──────────── file changed
//!                            │   │
//!               metadata()   │   │ remove()
//!                  ┌─────────┘   └──────────┐
//!                  ▼                        ▼
//!          AttachmentMetadata       trash ─▶ delete? ─▶ detach
//!        (parent = parent hash)
//! ```
//!
//! 1. [`attachment::build`] stats the file and produces an
//!    [`models::AttachmentDescriptor`] holding a weak reference to its
//!    [`directory::DirectoryNode`].
//! 2. [`attachment::metadata`] projects a descriptor into a flat
//!    [`models::AttachmentMetadata`] that can be serialized.
//! 3. [`attachment::reparse`] refreshes size and timestamps in place.
//! 4. [`remove::remove`] sends the file to a [`trash::Trash`], optionally
//!    hard-deletes it, and detaches the descriptor from its parent.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`attachment`] | Build, project, and reparse descriptors |
//! | [`config`] | TOML configuration parsing |
//! | [`directory`] | Owning directory node |
//! | [`error`] | Library error type |
//! | [`hash`] | Path identifiers |
//! | [`models`] | Core data types |
//! | [`remove`] | Trash-first removal and detachment |
//! | [`trash`] | Trash backends |

pub mod attachment;
pub mod config;
pub mod directory;
pub mod error;
pub mod hash;
pub mod models;
pub mod remove;
pub mod trash;
