//! Term preview command handlers.

use ring_designer::cli::render_preview;
use ring_designer::config::RingConfig;
use ring_designer::generation::{GenerationRequest, ImageGenerator, RingApiClient, TermCategory};
use ring_designer::services::ServiceContainer;

use super::{CommandResult, PreviewAction, emit};

/// Previews command.
pub fn cmd_previews(
    config: &RingConfig,
    services: &ServiceContainer,
    action: PreviewAction,
    json: bool,
) -> CommandResult {
    let previews = services.previews();
    match action {
        PreviewAction::List => emit(json, previews.all(), |all| {
            if all.is_empty() {
                return "No term previews cached".to_string();
            }
            let lines: Vec<String> = all.values().map(render_preview).collect();
            lines.join("\n")
        }),
        PreviewAction::Save {
            term,
            image_url,
            caption,
        } => {
            let caption = caption.unwrap_or_else(|| term.clone());
            emit(json, previews.save(&term, &image_url, &caption), render_preview)
        },
        PreviewAction::Generate {
            term,
            category,
            caption,
        } => {
            let category = TermCategory::parse_or_default(&category);
            let caption = caption.unwrap_or_else(|| term.clone());
            let client = RingApiClient::from_config(config);
            let result = client
                .generate(&GenerationRequest::new(category.prompt_for(&term)))
                .and_then(|image| previews.save(&term, &image.image_url, &caption));
            emit(json, result, render_preview)
        },
    }
}
