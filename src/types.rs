/// Shared types used across the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend identifier. The backend emits integers, but ids are treated as
/// opaque and echoed back in whatever form they arrived.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Num(i64),
    Text(String),
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Num(n) => f.pad(&n.to_string()),
            Id::Text(s) => f.pad(s),
        }
    }
}

impl From<i64> for Id {
    fn from(value: i64) -> Self {
        Id::Num(value)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        let value = value.trim();
        match value.parse::<i64>() {
            Ok(n) => Id::Num(n),
            Err(_) => Id::Text(value.to_string()),
        }
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Id::from(value.as_str())
    }
}

/// A single row of an import batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub name: String,
    pub number: String,
}

impl ContactRecord {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Id,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactList {
    pub id: Id,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactListDetail {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: Id,
    pub name: String,
    pub number: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewContact {
    pub name: String,
    pub number: String,
    #[serde(default)]
    pub tag_ids: Vec<Id>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewNamed {
    pub name: String,
}

/// Gateway credentials the backend uses to reach a WhatsApp instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub id: Id,
    pub name: String,
    pub api_url: String,
    #[serde(default)]
    pub api_key: String,
    pub instance_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewConnection {
    pub name: String,
    pub api_url: String,
    pub api_key: String,
    pub instance_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Draft,
    Running,
    Paused,
    Completed,
    Failed,
    #[serde(other)]
    Other,
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CampaignStatus::Draft => "draft",
            CampaignStatus::Running => "running",
            CampaignStatus::Paused => "paused",
            CampaignStatus::Completed => "completed",
            CampaignStatus::Failed => "failed",
            CampaignStatus::Other => "unknown",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub message_body: String,
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub messages_per_minute: u32,
    pub status: CampaignStatus,
    #[serde(default)]
    pub connection_id: Option<Id>,
    #[serde(default)]
    pub contact_list_id: Option<Id>,
}

pub const DEFAULT_MESSAGES_PER_MINUTE: u32 = 10;
pub const DEFAULT_MEDIA_TYPE: &str = "image";

/// New campaign as posted to the backend; always created as a draft
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignDraft {
    pub name: String,
    pub message_body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    pub messages_per_minute: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_list_id: Option<Id>,
    pub target_tags_ids: Vec<Id>,
    pub connection_id: Id,
    pub status: CampaignStatus,
}

impl CampaignDraft {
    pub fn new(name: impl Into<String>, message_body: impl Into<String>, connection_id: Id) -> Self {
        Self {
            name: name.into(),
            message_body: message_body.into(),
            media_url: None,
            media_type: None,
            messages_per_minute: DEFAULT_MESSAGES_PER_MINUTE,
            contact_list_id: None,
            target_tags_ids: Vec::new(),
            connection_id,
            status: CampaignStatus::Draft,
        }
    }

    /// Media type is only sent alongside a media url
    pub fn with_media(mut self, url: impl Into<String>, media_type: Option<String>) -> Self {
        let url = url.into();
        if url.trim().is_empty() {
            self.media_url = None;
            self.media_type = None;
        } else {
            self.media_url = Some(url);
            self.media_type = Some(media_type.unwrap_or_else(|| DEFAULT_MEDIA_TYPE.to_string()));
        }
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub delivered: u64,
    #[serde(default)]
    pub read: u64,
    #[serde(default)]
    pub failed: u64,
}

impl CampaignStats {
    /// Rounded share of `value` in `total`, 0 when nothing was sent
    pub fn percentage(&self, value: u64) -> u64 {
        if self.total == 0 {
            return 0;
        }
        ((value as f64 / self.total as f64) * 100.0).round() as u64
    }

    pub fn delivery_rate(&self) -> u64 {
        self.percentage(self.delivered)
    }

    pub fn read_rate(&self) -> u64 {
        self.percentage(self.read)
    }

    pub fn failure_rate(&self) -> u64 {
        self.percentage(self.failed)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignLog {
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl CampaignLog {
    pub fn display_name(&self) -> &str {
        self.contact_name.as_deref().filter(|n| !n.is_empty()).unwrap_or("Unknown")
    }

    /// Gateway numbers arrive as JIDs (`5511999999999@s.whatsapp.net`)
    pub fn display_number(&self) -> &str {
        match self.contact_number.as_deref() {
            Some(number) if !number.is_empty() => number.split('@').next().unwrap_or(number),
            _ => "-",
        }
    }

    /// Case-insensitive search over name, number and status
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        [&self.contact_name, &self.contact_number, &self.status]
            .iter()
            .any(|field| {
                field
                    .as_deref()
                    .unwrap_or("")
                    .to_lowercase()
                    .contains(&term)
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardCounts {
    pub connections: usize,
    pub tags: usize,
    pub contacts: usize,
    pub campaigns: usize,
}

/// Body of `POST /contacts/import`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportRequest {
    pub contacts: Vec<ContactRecord>,
    pub tag_ids: Vec<Id>,
    pub list_id: Option<Id>,
}

/// Backend verdict on an import; rendered as-is, missing counts read as 0
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    #[serde(default)]
    pub imported: i64,
    #[serde(default)]
    pub skipped: i64,
    #[serde(default)]
    pub list_id: Option<Id>,
}

impl fmt::Display for ImportResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} imported, {} skipped, ", self.imported, self.skipped)?;
        match &self.list_id {
            Some(id) => write!(f, "list {}", id),
            None => f.write_str("no list"),
        }
    }
}
