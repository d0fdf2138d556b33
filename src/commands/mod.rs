//! Command handlers module.
//!
//! This module organizes the CLI command implementations into separate files:
//! - `collection.rs`: Active collection and "The One"
//! - `trash.rs`: Soft delete, restore and purge
//! - `design.rs`: Local design, archive, and the confirm flow
//! - `previews.rs`: Term preview cache
//! - `generate.rs`: One-off image generation
//! - `config.rs`: Status and configuration display

mod collection;
mod config;
mod design;
mod generate;
mod previews;
mod trash;

use std::error::Error;
use std::fmt;

use clap::Subcommand;
use ring_designer::cli::json_envelope;
use serde::Serialize;

pub use collection::cmd_collection;
pub use config::{cmd_config, cmd_status};
pub use design::cmd_design;
pub use generate::cmd_generate;
pub use previews::cmd_previews;
pub use trash::cmd_trash;

/// Result type shared by command handlers.
pub type CommandResult = Result<(), Box<dyn Error>>;

/// Failure already written to stdout as a JSON envelope.
#[derive(Debug)]
pub struct AlreadyReported;

impl fmt::Display for AlreadyReported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("command failed")
    }
}

impl Error for AlreadyReported {}

/// Prints an operation result, as text or as a JSON envelope.
///
/// Failures become errors in text mode; in JSON mode the envelope carries
/// the message and the error is [`AlreadyReported`].
pub fn emit<T: Serialize>(
    json: bool,
    result: ring_designer::Result<T>,
    render: impl FnOnce(&T) -> String,
) -> CommandResult {
    if json {
        let failed = result.is_err();
        println!("{}", json_envelope(result)?);
        return if failed {
            Err(Box::new(AlreadyReported))
        } else {
            Ok(())
        };
    }

    let value = result?;
    println!("{}", render(&value));
    Ok(())
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the resolved configuration as TOML.
    Show,
}

/// Collection subcommands.
#[derive(Subcommand)]
pub enum CollectionAction {
    /// List rings, most recent first.
    List,

    /// Save a ring to the collection.
    Add {
        /// Image URL.
        #[arg(long)]
        image_url: String,

        /// Generation prompt.
        #[arg(long, default_value = "")]
        prompt: String,

        /// Display title.
        #[arg(long, default_value = "")]
        title: String,

        /// Ring type: gallery or generated.
        #[arg(long = "type", default_value = "generated")]
        kind: String,

        /// Designer name.
        #[arg(long)]
        designer: Option<String>,
    },

    /// Move a ring to the trash.
    Remove {
        /// Ring id.
        id: String,
    },

    /// Mark a ring as "The One", clearing every other ring.
    Mark {
        /// Ring id.
        id: String,
    },

    /// Clear the "The One" flag on a ring.
    Unmark {
        /// Ring id.
        id: String,
    },

    /// Show the ring marked as "The One".
    TheOne,
}

/// Trash subcommands.
#[derive(Subcommand)]
pub enum TrashAction {
    /// List trashed rings, most recently deleted first.
    List,

    /// Restore one ring to the collection.
    Restore {
        /// Ring id.
        id: String,
    },

    /// Restore every trashed ring.
    RestoreAll {
        /// Fail if any ring could not be restored.
        #[arg(long)]
        strict: bool,
    },

    /// Permanently delete one trashed ring.
    Delete {
        /// Ring id.
        id: String,
    },

    /// Permanently delete every trashed ring.
    Empty {
        /// Fail if any ring could not be deleted.
        #[arg(long)]
        strict: bool,
    },
}

/// Design subcommands.
#[derive(Subcommand)]
pub enum DesignAction {
    /// Show the design saved on this machine.
    Local,

    /// Show the most recently archived design.
    Latest,

    /// List archived designs, most recent first.
    List,

    /// Pick or generate a design and confirm it.
    Confirm {
        /// Curated gallery ring id.
        #[arg(long, conflicts_with = "description")]
        gallery: Option<u32>,

        /// Description of a custom ring.
        #[arg(long, required_unless_present = "gallery")]
        description: Option<String>,

        /// Refinement instructions applied to the generated ring.
        #[arg(long, requires = "description")]
        refine: Option<String>,
    },
}

/// Preview subcommands.
#[derive(Subcommand)]
pub enum PreviewAction {
    /// List cached term previews.
    List,

    /// Cache a preview image for a term.
    Save {
        /// Term, e.g. "Round Brilliant".
        term: String,

        /// Image URL.
        #[arg(long)]
        image_url: String,

        /// Caption; defaults to the term.
        #[arg(long)]
        caption: Option<String>,
    },

    /// Generate and cache a preview image for a term.
    Generate {
        /// Term, e.g. "Round Brilliant".
        term: String,

        /// Category: shapes, settings, metals or accents.
        #[arg(long, default_value = "shapes")]
        category: String,

        /// Caption; defaults to the term.
        #[arg(long)]
        caption: Option<String>,
    },
}
