//! Project-management provider: OAuth2 refresh-token auth, `Link`-header
//! pagination, and typed clients for each resource family.

mod campfires;
mod client;
mod comments;
mod messages;
mod models;
mod people;
mod projects;
mod recordings;
mod schedules;
mod token;
mod todos;
mod webhooks;

use std::sync::Arc;

pub use campfires::CampfireClient;
pub use client::BasecampClient;
pub use comments::CommentClient;
pub use messages::MessageClient;
pub use models::{
    AccessGranted, AccessUpdate, Bucket, CampfireLine, Comment, Identity, Message, NewComment,
    NewMessage,
    NewPerson, NewScheduleEntry, NewTodo, NewTodoGroup, NewTodoList, NewWebhook, Parent, Person,
    Project, ProjectDock, Recording, RecurrenceSchedule, ScheduleEntry, Todo, TodoGroup, TodoList,
    UserInfo, Webhook,
};
pub use people::PeopleClient;
pub use projects::ProjectClient;
pub use recordings::RecordingClient;
pub use schedules::ScheduleClient;
pub use token::{OauthToken, TokenManager};
pub use todos::TodoClient;
pub use webhooks::WebhookClient;

use crate::config::{BasecampResolvedConfig, Config};
use crate::error::TetherError;
use crate::throttle::Throttle;

/// Everything needed to talk to the provider, built once and shared.
///
/// All resource clients share one HTTP connection pool, one token manager
/// and one page throttle, so concurrent callers refresh the token at most
/// once and pagination stays within the provider's rate expectations.
pub struct BasecampService {
    pub projects: ProjectClient,
    pub campfires: CampfireClient,
    pub todos: TodoClient,
    pub comments: CommentClient,
    pub schedules: ScheduleClient,
    pub people: PeopleClient,
    pub messages: MessageClient,
    pub recordings: RecordingClient,
    pub webhooks: WebhookClient,
}

impl BasecampService {
    pub fn new(cfg: &BasecampResolvedConfig) -> Result<Self, TetherError> {
        let http = reqwest::Client::builder().timeout(cfg.http_timeout).build()?;
        let tokens = Arc::new(TokenManager::new(cfg, http.clone())?);
        let client = Arc::new(BasecampClient::new(cfg, tokens, http.clone()));
        let throttle = Arc::new(Throttle::every(cfg.page_delay));

        Ok(Self {
            projects: ProjectClient::new(Arc::clone(&client), Arc::clone(&throttle)),
            campfires: CampfireClient::new(Arc::clone(&client), http, cfg.bot_key.clone()),
            todos: TodoClient::new(Arc::clone(&client), Arc::clone(&throttle)),
            comments: CommentClient::new(Arc::clone(&client), Arc::clone(&throttle)),
            schedules: ScheduleClient::new(Arc::clone(&client), Arc::clone(&throttle)),
            people: PeopleClient::new(Arc::clone(&client), Arc::clone(&throttle)),
            messages: MessageClient::new(Arc::clone(&client), Arc::clone(&throttle)),
            recordings: RecordingClient::new(Arc::clone(&client), Arc::clone(&throttle)),
            webhooks: WebhookClient::new(client, throttle),
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self, TetherError> {
        Self::new(&BasecampResolvedConfig::resolve(cfg))
    }
}
