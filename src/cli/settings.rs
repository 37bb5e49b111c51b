//! taskly config command implementation.

use crate::cli::Context;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::locale::Translations;
use crate::output::{emit_success, HumanOutput};

pub struct SetOptions {
    pub language: Option<String>,
    pub date_format: Option<String>,
    pub time_format: Option<String>,
    pub notifications: Option<bool>,
}

impl SetOptions {
    fn is_empty(&self) -> bool {
        self.language.is_none()
            && self.date_format.is_none()
            && self.time_format.is_none()
            && self.notifications.is_none()
    }
}

/// Show the current settings, or update the given fields.
pub fn run(ctx: &Context, options: SetOptions) -> Result<()> {
    let path = ctx.storage.config_path();
    let mut config = Config::load(&path);

    if !options.is_empty() {
        if let Some(language) = options.language {
            // Reject unknown locales up front instead of at render time.
            Translations::builtin(&language)?;
            config.language = language;
        }
        if let Some(date_format) = options.date_format {
            config.date_format = date_format;
        }
        if let Some(time_format) = options.time_format {
            if time_format != "12" && time_format != "24" {
                return Err(Error::InvalidInput(
                    "time format must be 12 or 24".to_string(),
                ));
            }
            config.time_format = time_format;
        }
        if let Some(notifications) = options.notifications {
            config.notifications = notifications;
        }
        config.save(&path)?;
    }

    let mut human = HumanOutput::new("Settings");
    human.push_summary("language", config.language.as_str());
    human.push_summary("date format", config.date_format.as_str());
    human.push_summary("time format", config.time_format.as_str());
    human.push_summary("notifications", config.notifications.to_string());
    emit_success(ctx.output(), "config", &config, Some(&human))
}
