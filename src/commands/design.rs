//! Design command handlers.

use std::sync::Arc;

use ring_designer::app::{DesignFlow, Screen};
use ring_designer::cli::{render_design, render_design_record};
use ring_designer::config::RingConfig;
use ring_designer::generation::RingApiClient;
use ring_designer::services::{Confirmation, ServiceContainer};
use ring_designer::{Error, Result};

use super::{CommandResult, DesignAction, emit};

/// Design command.
pub fn cmd_design(
    config: &RingConfig,
    services: &ServiceContainer,
    action: DesignAction,
    json: bool,
) -> CommandResult {
    match action {
        DesignAction::Local => {
            let design = services
                .designs()
                .current()
                .ok_or_else(|| Error::NotFound("No design in progress".to_string()));
            emit(json, design, render_design)
        },
        DesignAction::Latest => emit(
            json,
            services.collections().get_latest_design(),
            render_design_record,
        ),
        DesignAction::List => emit(json, services.collections().get_designs(), |records| {
            if records.is_empty() {
                return "No designs archived".to_string();
            }
            let lines: Vec<String> = records.iter().map(render_design_record).collect();
            lines.join("\n")
        }),
        DesignAction::Confirm {
            gallery,
            description,
            refine,
        } => {
            let result = confirm(config, services, gallery, description, refine);
            emit(json, result, render_confirmation)
        },
    }
}

/// Walks the design flow from the choice screen to the thank-you screen.
fn confirm(
    config: &RingConfig,
    services: &ServiceContainer,
    gallery: Option<u32>,
    description: Option<String>,
    refine: Option<String>,
) -> Result<Confirmation> {
    let generator = Arc::new(RingApiClient::from_config(config));
    let mut flow = DesignFlow::new(config.gallery.clone(), generator, services.designs().clone());

    if let Some(previous) = flow.saved_design() {
        tracing::info!(
            confirmed_at = %ring_designer::format_timestamp(&previous.timestamp),
            "Replacing design in progress"
        );
    }

    flow.show(Screen::Choice);
    match (gallery, description) {
        (Some(id), _) => {
            flow.show(Screen::Gallery);
            flow.select_gallery_ring(id)?;
        },
        (None, Some(description)) => {
            flow.show(Screen::Designer);
            flow.generate(&description)?;
            if let Some(instructions) = refine {
                flow.refine(&instructions)?;
            }
        },
        (None, None) => {
            return Err(Error::InvalidInput(
                "either --gallery or --description is required".to_string(),
            ));
        },
    }

    flow.show_preview()?;
    flow.confirm()
}

fn render_confirmation(confirmation: &Confirmation) -> String {
    let mut lines = vec![render_design(&confirmation.design)];
    if confirmation.saved_locally {
        lines.push("Saved on this machine".to_string());
    }
    match (&confirmation.cloud_id, &confirmation.cloud_error) {
        (Some(id), _) => lines.push(format!("Archived as {id}")),
        (None, Some(error)) => lines.push(format!("Not archived: {error}")),
        (None, None) => {},
    }
    if !confirmation.persisted() {
        lines.push("Warning: the design was not saved anywhere".to_string());
    }
    lines.join("\n")
}
