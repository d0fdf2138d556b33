//! Status and config command handlers.

use ring_designer::Error;
use ring_designer::cli::StatusReport;
use ring_designer::config::RingConfig;
use ring_designer::services::ServiceContainer;

use super::{CommandResult, ConfigAction, emit};

/// Status command.
pub fn cmd_status(config: &RingConfig, services: &ServiceContainer, json: bool) -> CommandResult {
    let report = StatusReport::collect(config, services);
    emit(json, Ok(report), ToString::to_string)
}

/// Config command.
pub fn cmd_config(config: &RingConfig, action: ConfigAction, json: bool) -> CommandResult {
    match action {
        ConfigAction::Show => {
            if json {
                return emit(json, Ok(config), |_| String::new());
            }
            let text = toml::to_string_pretty(config).map_err(|e| Error::OperationFailed {
                operation: "serialize_config".to_string(),
                cause: e.to_string(),
            })?;
            println!("{}", text.trim_end());
            Ok(())
        },
    }
}
