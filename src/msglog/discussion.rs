//! A whole message-log file.

use std::fmt;
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::LogError;
use crate::msglog::message::Message;

/// All messages of one exported conversation, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Discussion {
    file_name: String,
    messages: Vec<Message>,
}

impl Discussion {
    /// Read a discussion from a JSON file holding an array of records.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LogError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let discussion = Self::from_json_str(path.display().to_string(), &text)?;

        tracing::info!(
            file = %path.display(),
            messages = discussion.len(),
            "loaded message log"
        );
        Ok(discussion)
    }

    /// Build a discussion from JSON text; `file_name` is only used for display.
    pub fn from_json_str(file_name: impl Into<String>, text: &str) -> Result<Self, LogError> {
        let records = match serde_json::from_str::<Value>(text)? {
            Value::Array(records) => records,
            _ => return Err(LogError::NotAnArray),
        };

        let messages = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| Message::from_value(index, record))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            file_name: file_name.into(),
            messages,
        })
    }

    /// Name of the file the messages came from.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Messages in file order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Messages from last to first.
    pub fn newest_first(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl fmt::Display for Discussion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} contains {} messages", self.file_name, self.messages.len())
    }
}
