use std::sync::Arc;

use reqwest::Method;
use tracing::info;
use url::Url;

use super::client::BasecampClient;
use super::models::{NewTodo, NewTodoGroup, NewTodoList, Todo, TodoGroup, TodoList};
use crate::error::TetherError;
use crate::throttle::Throttle;

/// Todo sets, lists, groups and the todos inside them.
pub struct TodoClient {
    client: Arc<BasecampClient>,
    throttle: Arc<Throttle>,
}

impl TodoClient {
    pub(crate) fn new(client: Arc<BasecampClient>, throttle: Arc<Throttle>) -> Self {
        Self { client, throttle }
    }

    /// Every list in a todoset, across all pages.
    pub async fn lists(&self, project_id: i64, todoset_id: i64) -> Result<Vec<TodoList>, TetherError> {
        let url = self
            .client
            .bucket_url(project_id, &format!("todosets/{todoset_id}/todolists.json"))?;
        self.client.get_all(url, &self.throttle).await
    }

    /// Every todo in a list, across all pages.
    pub async fn all_in_list(&self, project_id: i64, list_id: i64) -> Result<Vec<Todo>, TetherError> {
        let url = self
            .client
            .bucket_url(project_id, &format!("todolists/{list_id}/todos.json"))?;
        self.client.get_all(url, &self.throttle).await
    }

    pub async fn groups(&self, project_id: i64, list_id: i64) -> Result<Vec<TodoGroup>, TetherError> {
        let url = self
            .client
            .bucket_url(project_id, &format!("todolists/{list_id}/groups.json"))?;
        self.client.get_json(url).await
    }

    /// Fetches a single todo by its canonical API URL, as returned in
    /// listing payloads and webhook events.
    pub async fn get(&self, url: Url) -> Result<Todo, TetherError> {
        self.client.get_json(url).await
    }

    pub async fn create(
        &self,
        project_id: i64,
        list_id: i64,
        todo: &NewTodo,
    ) -> Result<Todo, TetherError> {
        let url = self
            .client
            .bucket_url(project_id, &format!("todolists/{list_id}/todos.json"))?;
        let created: Todo = self.client.post_json(url, &serde_json::to_value(todo)?).await?;
        info!(todo_id = created.id, project_id, "created todo");
        Ok(created)
    }

    pub async fn create_list(
        &self,
        project_id: i64,
        todoset_id: i64,
        list: &NewTodoList,
    ) -> Result<TodoList, TetherError> {
        let url = self
            .client
            .bucket_url(project_id, &format!("todosets/{todoset_id}/todolists.json"))?;
        self.client.post_json(url, &serde_json::to_value(list)?).await
    }

    pub async fn create_group(
        &self,
        project_id: i64,
        list_id: i64,
        group: &NewTodoGroup,
    ) -> Result<TodoGroup, TetherError> {
        let url = self
            .client
            .bucket_url(project_id, &format!("todolists/{list_id}/groups.json"))?;
        self.client.post_json(url, &serde_json::to_value(group)?).await
    }

    /// Replaces the mutable fields of a todo. Omitted optional fields are
    /// cleared by the provider, so callers should send the full shape.
    pub async fn update(
        &self,
        project_id: i64,
        todo_id: i64,
        todo: &NewTodo,
    ) -> Result<Todo, TetherError> {
        let url = self
            .client
            .bucket_url(project_id, &format!("todos/{todo_id}.json"))?;
        self.client.put_json(url, &serde_json::to_value(todo)?).await
    }

    pub async fn complete(&self, project_id: i64, todo_id: i64) -> Result<(), TetherError> {
        let url = self
            .client
            .bucket_url(project_id, &format!("todos/{todo_id}/completion.json"))?;
        self.client.execute(Method::POST, url, None).await?;
        Ok(())
    }

    /// Finds a todo by title (case-insensitive) in a list, creating it when
    /// no page contains a match.
    pub async fn first_or_create(
        &self,
        project_id: i64,
        list_id: i64,
        title: &str,
    ) -> Result<Todo, TetherError> {
        let existing = self.all_in_list(project_id, list_id).await?;
        if let Some(todo) = existing
            .into_iter()
            .find(|t| t.title.eq_ignore_ascii_case(title) || t.content.eq_ignore_ascii_case(title))
        {
            return Ok(todo);
        }
        self.create(project_id, list_id, &NewTodo::titled(title)).await
    }

    pub async fn first_or_create_list(
        &self,
        project_id: i64,
        todoset_id: i64,
        name: &str,
    ) -> Result<TodoList, TetherError> {
        let existing = self.lists(project_id, todoset_id).await?;
        if let Some(list) = existing.into_iter().find(|l| {
            l.name.eq_ignore_ascii_case(name) || l.title.eq_ignore_ascii_case(name)
        }) {
            return Ok(list);
        }
        let new_list = NewTodoList {
            name: name.to_owned(),
            description: None,
        };
        self.create_list(project_id, todoset_id, &new_list).await
    }

    pub async fn first_or_create_group(
        &self,
        project_id: i64,
        list_id: i64,
        name: &str,
    ) -> Result<TodoGroup, TetherError> {
        let existing = self.groups(project_id, list_id).await?;
        if let Some(group) = existing.into_iter().find(|g| {
            g.name.eq_ignore_ascii_case(name) || g.title.eq_ignore_ascii_case(name)
        }) {
            return Ok(group);
        }
        let new_group = NewTodoGroup {
            name: name.to_owned(),
        };
        self.create_group(project_id, list_id, &new_group).await
    }
}
