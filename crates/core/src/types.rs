use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ─── Channels & Intents ─────────────────────────────────────────────────

/// Delivery channel for a campaign. The original UI called this the
/// campaign "weapon".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Sms,
}

impl Channel {
    pub fn display_name(&self) -> &'static str {
        match self {
            Channel::Email => "email",
            Channel::Sms => "sms",
        }
    }
}

/// Engagement intent classification driving tone and content policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EngagementIntent {
    Cold,
    Warm,
    Hot,
    Followup,
}

impl EngagementIntent {
    /// Parse a free-form intent key from the API boundary. Unrecognized
    /// keys fall back to Cold so a typo never aborts a batch.
    pub fn parse(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "cold" => EngagementIntent::Cold,
            "warm" => EngagementIntent::Warm,
            "hot" => EngagementIntent::Hot,
            "followup" | "follow-up" | "follow_up" => EngagementIntent::Followup,
            other => {
                tracing::warn!(intent = %other, "Unrecognized engagement intent, defaulting to cold");
                EngagementIntent::Cold
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EngagementIntent::Cold => "cold",
            EngagementIntent::Warm => "warm",
            EngagementIntent::Hot => "hot",
            EngagementIntent::Followup => "followup",
        }
    }
}

// ─── Outcomes ───────────────────────────────────────────────────────────

/// Classification of how a contact responded to a send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Replied,
    MeetingBooked,
    OpportunityCreated,
    NoResponse,
    Unsubscribed,
}

impl Outcome {
    /// Terminal outcomes lock the record in the same write that sets them.
    /// Replied and NoResponse stay unlocked so the entry can be
    /// reclassified or chained into a follow-up.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Outcome::MeetingBooked | Outcome::OpportunityCreated | Outcome::Unsubscribed
        )
    }
}

/// Delivery status of a send entry. The ledger only commits entries whose
/// dispatch succeeded, so persisted records are always Sent in this scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SendStatus {
    Sent,
    Failed,
}

// ─── Campaigns ──────────────────────────────────────────────────────────

/// One contact's send attempt and outcome within a campaign.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactSendRecord {
    pub contact_id: Uuid,
    pub name: String,
    /// Email address or phone number, matching the campaign channel.
    pub destination: String,
    pub subject: String,
    pub body: String,
    pub status: SendStatus,
    pub sent_at: DateTime<Utc>,
    pub provider_message_id: String,
    pub outcome: Option<Outcome>,
    pub outcome_marked_at: Option<DateTime<Utc>>,
    pub outcome_locked: bool,
    pub outcome_locked_at: Option<DateTime<Utc>>,
}

/// A batch of outreach sends sharing a channel and engagement intent.
/// Follow-up campaigns reference their originating campaign through
/// `parent_campaign_id` and carry exactly one send record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Campaign {
    pub id: Uuid,
    pub name: String,
    pub channel: Channel,
    pub engagement_intent: EngagementIntent,
    pub parent_campaign_id: Option<Uuid>,
    pub contacts: Vec<ContactSendRecord>,
    pub created_at: DateTime<Utc>,
    pub user_id: String,
}

// ─── Templates ──────────────────────────────────────────────────────────

/// Reusable message template, owned by exactly one user. Ownership is
/// encoded in the storage key, not the document.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Template {
    pub id: Uuid,
    pub name: String,
    pub subject: String,
    pub body: String,
    /// Free-form intent label ("cold", "renewal push", ...).
    pub intent: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ─── Contacts & Activity ────────────────────────────────────────────────

/// Append-only activity event types on a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    NoteAdded,
    NoteEdited,
    NoteDeleted,
    Enriched,
    ProfileViewed,
    EmailDrafted,
    EmailSent,
    ContactCreated,
}

/// One entry in a contact's activity log. Immutable once appended;
/// deletions append a new entry rather than removing history.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Activity {
    pub activity_type: ActivityType,
    pub details: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Note {
    pub id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A B2B contact with profile fields and an append-only activity log.
/// Stored in insertion order; presented newest-first.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Contact {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub company: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub activity_log: Vec<Activity>,
    pub created_at: DateTime<Utc>,
}

impl Contact {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// The destination field a channel requires: email address for Email,
    /// phone number for Sms. Empty strings count as missing.
    pub fn destination_for(&self, channel: Channel) -> Option<&str> {
        let field = match channel {
            Channel::Email => self.email.as_deref(),
            Channel::Sms => self.phone.as_deref(),
        };
        field.filter(|v| !v.trim().is_empty())
    }

    pub fn append_activity(&mut self, activity_type: ActivityType, details: impl Into<String>) {
        self.activity_log.push(Activity {
            activity_type,
            details: details.into(),
            timestamp: Utc::now(),
        });
    }
}
