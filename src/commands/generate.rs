//! Generate command handler.

use ring_designer::config::RingConfig;
use ring_designer::generation::{
    GenerationRequest, ImageGenerator, RingApiClient, validate_description,
};

use super::{CommandResult, emit};

/// Generate command.
pub fn cmd_generate(
    config: &RingConfig,
    description: &str,
    reference: Option<String>,
    json: bool,
) -> CommandResult {
    let client = RingApiClient::from_config(config);
    let result = validate_description(description).and_then(|description| {
        let request = match reference {
            Some(reference) => GenerationRequest::refine(description, reference),
            None => GenerationRequest::new(description),
        };
        client.generate(&request)
    });

    emit(json, result, |image| {
        format!("Image: {}\nPrompt: {}", image.image_url, image.prompt)
    })
}
