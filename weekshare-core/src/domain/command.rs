// weekshare-core/src/domain/command.rs

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const USAGE: &str = "사용법: /share {주차}\n예: /share 3";

/// Inbound slash command, decoded from an `x-www-form-urlencoded` body.
///
/// Missing fields decode to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlashCommand {
    pub command: String,
    pub text: String,
    pub user_id: String,
    pub user_name: String,
    pub channel_id: String,
    pub response_url: String,
}

impl SlashCommand {
    pub fn from_form(body: &str) -> Self {
        let mut cmd = Self::default();
        for (key, value) in url::form_urlencoded::parse(body.as_bytes()) {
            let slot = match key.as_ref() {
                "command" => &mut cmd.command,
                "text" => &mut cmd.text,
                "user_id" => &mut cmd.user_id,
                "user_name" => &mut cmd.user_name,
                "channel_id" => &mut cmd.channel_id,
                "response_url" => &mut cmd.response_url,
                _ => continue,
            };
            // First occurrence wins.
            if slot.is_empty() {
                *slot = value.into_owned();
            }
        }
        cmd
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Week argument is missing")]
    MissingWeek,
    #[error("Week argument '{0}' is not a non-negative integer")]
    InvalidWeek(String),
}

/// Interprets the free-text argument as a week number (ASCII digits only).
pub fn parse_week(text: &str) -> Result<u32, CommandError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CommandError::MissingWeek);
    }
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CommandError::InvalidWeek(text.to_string()));
    }
    // Older cohorts resolve week + 1, which must stay representable.
    text.parse::<u32>()
        .ok()
        .filter(|week| week.checked_add(1).is_some())
        .ok_or_else(|| CommandError::InvalidWeek(text.to_string()))
}

/// Work handed from the front door to the processor.
///
/// A payload without `week` comes from the scheduled trigger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandOff {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

impl HandOff {
    pub fn for_command(week: u32, command: &SlashCommand) -> Self {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Self {
            week: Some(week),
            response_url: non_empty(&command.response_url),
            user_name: non_empty(&command.user_name),
        }
    }

    pub fn scheduled() -> Self {
        Self::default()
    }
}

/// Immediate reply to the slash command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgment {
    pub response_type: String,
    pub text: String,
}

impl Acknowledgment {
    pub fn ephemeral(text: impl Into<String>) -> Self {
        Self {
            response_type: "ephemeral".to_string(),
            text: text.into(),
        }
    }

    pub fn usage() -> Self {
        Self::ephemeral(USAGE)
    }
}
