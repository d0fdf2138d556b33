//! CLI support shared by the `ring-designer` binary.
//!
//! Command handlers live in the binary; this module holds the pieces they
//! share that are worth testing on their own: text rendering, the `--json`
//! envelope, and the status report.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `status` | Show configuration and local mirror state |
//! | `config show` | Print the resolved configuration |
//! | `collection` | List, add, remove and flag rings |
//! | `trash` | List, restore and purge trashed rings |
//! | `design` | Inspect and confirm designs |
//! | `previews` | Term preview cache |
//! | `generate` | Generate a ring image |
//!
//! # Example Usage
//!
//! ```bash
//! ring-designer collection list
//! ring-designer collection remove ring_1718000000000
//! ring-designer trash restore-all
//! ring-designer --json collection the-one
//! ```

mod render;
mod status;

pub use render::{
    render_design, render_design_record, render_outcome, render_preview, render_ring,
    render_trashed,
};
pub use status::StatusReport;

use crate::models::{RingKind, StoreResponse};
use crate::{Error, Result};
use serde::Serialize;

/// Serializes an operation result as a `{success, data?, error?}` envelope.
///
/// # Errors
///
/// Returns an error if the payload cannot be serialized.
pub fn json_envelope<T: Serialize>(result: Result<T>) -> Result<String> {
    let response: StoreResponse<T> = result.into();
    serde_json::to_string_pretty(&response).map_err(|e| Error::OperationFailed {
        operation: "serialize_response".to_string(),
        cause: e.to_string(),
    })
}

/// Parses a ring type argument.
///
/// # Errors
///
/// Returns `InvalidInput` for anything but `gallery` or `generated`.
pub fn parse_ring_kind(s: &str) -> Result<RingKind> {
    RingKind::parse(s.trim())
        .ok_or_else(|| Error::InvalidInput(format!("unknown ring type '{s}'")))
}
