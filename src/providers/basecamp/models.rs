//! Wire models for the Basecamp API. Listing endpoints return sparse
//! variants of these shapes, so every field defaults.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Person {
    pub id: i64,
    pub attachable_sgid: String,
    pub name: String,
    pub email_address: String,
    pub title: String,
    pub bio: Option<String>,
    pub admin: bool,
    pub owner: bool,
    pub time_zone: String,
    pub avatar_url: String,
    pub personable_type: String,
}

/// Response of the launchpad `authorization.json` endpoint: who the current
/// token belongs to and when it lapses.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    pub expires_at: DateTime<Utc>,
    pub identity: Identity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Parent {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Bucket {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub content: String,
    pub description: String,
    pub completed: bool,
    pub assignees: Vec<Person>,
    pub assignee_ids: Vec<i64>,
    pub due_on: Option<String>,
    pub starts_on: Option<String>,
    pub app_url: String,
    pub comments_url: String,
    pub parent: Option<Parent>,
    pub bucket: Option<Bucket>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TodoList {
    pub id: i64,
    pub name: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub completed: bool,
    pub todos_url: String,
    pub app_url: String,
    pub parent: Option<Parent>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TodoGroup {
    pub id: i64,
    pub name: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub completed: bool,
    pub completed_ratio: String,
    pub inherits_status: bool,
    pub parent: Option<Parent>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Comment {
    pub id: i64,
    pub status: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
    pub url: String,
    pub app_url: String,
    pub parent: Option<Parent>,
    pub bucket: Option<Bucket>,
    pub creator: Option<Person>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub purpose: String,
    pub status: String,
    pub url: String,
    pub app_url: String,
    pub dock: Vec<ProjectDock>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// One tool pinned to a project: its todoset, schedule, message board and
/// so on. Resource ids for the nested clients come from here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectDock {
    pub id: i64,
    pub name: String,
    pub title: String,
    pub enabled: bool,
    pub position: Option<i64>,
    pub url: String,
    pub app_url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScheduleEntry {
    pub id: i64,
    pub summary: String,
    pub description: String,
    pub all_day: bool,
    pub starts_at: String,
    pub ends_at: String,
    pub participant_ids: Vec<i64>,
    pub participants: Vec<Person>,
    pub app_url: String,
    pub recurrence_schedule: Option<RecurrenceSchedule>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RecurrenceSchedule {
    pub frequency: String,
    pub days: Vec<i64>,
    pub week_instance: Option<i64>,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Message {
    pub id: i64,
    pub subject: String,
    pub content: String,
    pub status: String,
    pub app_url: String,
    pub comments_url: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Recording {
    pub id: i64,
    pub status: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub visible_to_clients: bool,
    pub inherits_status: bool,
    pub url: String,
    pub app_url: String,
    pub comments_count: i64,
    pub comments_url: String,
    pub parent: Option<Parent>,
    pub bucket: Option<Bucket>,
    pub creator: Option<Person>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Webhook {
    pub id: i64,
    pub active: bool,
    pub payload_url: String,
    pub types: Vec<String>,
    pub url: String,
    pub app_url: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

// Request payloads. Optional fields are omitted from the wire entirely.

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewTodo {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify: Option<bool>,
}

impl NewTodo {
    pub fn titled(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewTodoList {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewTodoGroup {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewComment {
    pub content: String,
}

/// One chat line, posted to a campfire or a bot callback URL.
#[derive(Debug, Clone, Serialize)]
pub struct CampfireLine {
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewScheduleEntry {
    pub summary: String,
    pub starts_at: String,
    pub ends_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_day: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_ids: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewMessage {
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewWebhook {
    pub payload_url: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewPerson {
    pub name: String,
    pub email_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

/// Payload of the project-access update endpoint: grant or revoke existing
/// people, or create-and-grant in one step.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AccessUpdate {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub grant: Vec<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub revoke: Vec<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub create: Vec<NewPerson>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AccessGranted {
    pub granted: Vec<Person>,
    pub revoked: Vec<Person>,
}
