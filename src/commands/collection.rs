//! Collection command handlers.

use ring_designer::RingDraft;
use ring_designer::cli::{parse_ring_kind, render_ring};
use ring_designer::services::ServiceContainer;

use super::{CollectionAction, CommandResult, emit};

/// Collection command.
pub fn cmd_collection(
    services: &ServiceContainer,
    action: CollectionAction,
    json: bool,
) -> CommandResult {
    match action {
        CollectionAction::List => emit(json, services.collections().get_collection(), |rings| {
            if rings.is_empty() {
                return "Collection is empty".to_string();
            }
            let lines: Vec<String> = rings.iter().map(render_ring).collect();
            format!("{} rings\n{}", rings.len(), lines.join("\n"))
        }),
        CollectionAction::Add {
            image_url,
            prompt,
            title,
            kind,
            designer,
        } => {
            let draft = RingDraft {
                image_url,
                prompt,
                title,
                kind: parse_ring_kind(&kind)?,
                designer_name: designer,
            };
            emit(json, services.collections().save_to_collection(draft), |ring| {
                format!("Saved {}", ring.id)
            })
        },
        CollectionAction::Remove { id } => {
            emit(json, services.trash().remove_from_collection(&id), |_| {
                format!("Moved {id} to trash")
            })
        },
        CollectionAction::Mark { id } => {
            emit(json, services.the_one().mark_as_the_one(&id), |ring| {
                format!("{} is The One", ring.id)
            })
        },
        CollectionAction::Unmark { id } => {
            emit(json, services.the_one().unmark_as_the_one(&id), |ring| {
                format!("{} is no longer The One", ring.id)
            })
        },
        CollectionAction::TheOne => emit(json, services.the_one().get_the_one(), render_ring),
    }
}
