//! Trash command handlers.

use ring_designer::BatchOutcome;
use ring_designer::cli::{render_outcome, render_ring, render_trashed};
use ring_designer::services::ServiceContainer;

use super::{CommandResult, TrashAction, emit};

fn progress(verb: &'static str, quiet: bool) -> impl FnMut(usize, usize) {
    move |done, total| {
        if !quiet {
            eprintln!("{verb} {done}/{total}");
        }
    }
}

/// A batch where nothing succeeded is always an error; `strict` also rejects
/// any single failure.
fn finish(
    outcome: ring_designer::Result<BatchOutcome>,
    strict: bool,
) -> ring_designer::Result<BatchOutcome> {
    if strict {
        outcome.and_then(BatchOutcome::ensure_complete)
    } else {
        outcome.and_then(BatchOutcome::ensure_success)
    }
}

/// Trash command.
pub fn cmd_trash(services: &ServiceContainer, action: TrashAction, json: bool) -> CommandResult {
    let trash = services.trash();
    match action {
        TrashAction::List => emit(json, services.collections().get_trash(), |rings| {
            if rings.is_empty() {
                return "Trash is empty".to_string();
            }
            let lines: Vec<String> = rings.iter().map(render_trashed).collect();
            format!("{} rings in trash\n{}", rings.len(), lines.join("\n"))
        }),
        TrashAction::Restore { id } => emit(json, trash.restore_from_trash(&id), |ring| {
            format!("Restored\n{}", render_ring(ring))
        }),
        TrashAction::RestoreAll { strict } => {
            let mut on_progress = progress("Restoring", json);
            let outcome = trash.restore_all_from_trash(Some(&mut on_progress));
            emit(json, finish(outcome, strict), render_outcome)
        },
        TrashAction::Delete { id } => emit(json, trash.permanently_delete(&id), |_| {
            format!("Permanently deleted {id}")
        }),
        TrashAction::Empty { strict } => {
            let mut on_progress = progress("Deleting", json);
            let outcome = trash.empty_trash(Some(&mut on_progress));
            emit(json, finish(outcome, strict), render_outcome)
        },
    }
}
