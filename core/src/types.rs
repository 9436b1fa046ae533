//! Domain DTOs for the user/post/todo API.
//!
//! # Design
//! These types describe the *shape* of what the remote service persists; no
//! state is held locally. Creation payloads omit server-assigned fields
//! (`id`, `user_id`, and for todos `due_on`). Update payloads are partial:
//! omitted fields are not serialized, so the same type serves PUT and PATCH.

use serde::{Deserialize, Serialize};

/// Longest title the service accepts for posts and todos.
pub const TITLE_MAX_LEN: usize = 200;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TodoStatus {
    Pending,
    Completed,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl UserStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
        }
    }
}

impl TodoStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TodoStatus::Pending => "pending",
            TodoStatus::Completed => "completed",
        }
    }
}

/// A user account. `id` is absent until the service assigns one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub status: UserStatus,
}

/// Request payload for `POST /users`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub status: UserStatus,
}

/// Request payload for `PUT`/`PATCH /users/:id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
}

/// A post, always owned by exactly one user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub body: String,
    pub user_id: u64,
}

/// Request payload for `POST /users/:id/posts`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatePost {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdatePost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// A todo, always owned by exactly one user.
///
/// `due_on` is `null` on the wire until a due date is set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub due_on: Option<String>,
    pub user_id: u64,
    pub status: TodoStatus,
}

/// Request payload for `POST /users/:id/todos`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateTodo {
    pub title: String,
    pub status: TodoStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TodoStatus>,
}

/// One entry of a 422 response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_serialize_lowercase() {
        assert_eq!(serde_json::to_value(Gender::Female).unwrap(), "female");
        assert_eq!(serde_json::to_value(UserStatus::Inactive).unwrap(), "inactive");
        assert_eq!(serde_json::to_value(TodoStatus::Completed).unwrap(), "completed");
    }

    #[test]
    fn as_str_agrees_with_serde() {
        for g in [Gender::Male, Gender::Female] {
            assert_eq!(serde_json::to_value(g).unwrap(), g.as_str());
        }
        for s in [TodoStatus::Pending, TodoStatus::Completed] {
            assert_eq!(serde_json::to_value(s).unwrap(), s.as_str());
        }
    }

    #[test]
    fn user_without_id_omits_it() {
        let user = User {
            id: None,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            gender: Gender::Female,
            status: UserStatus::Active,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["gender"], "female");
    }

    #[test]
    fn user_deserializes_with_server_id() {
        let user: User = serde_json::from_str(
            r#"{"id":7012,"name":"Ada","email":"ada@example.com","gender":"female","status":"active"}"#,
        )
        .unwrap();
        assert_eq!(user.id, Some(7012));
        assert_eq!(user.status, UserStatus::Active);
    }

    #[test]
    fn update_user_skips_absent_fields() {
        let update = UpdateUser {
            name: Some("Updated Test User".to_string()),
            status: Some(UserStatus::Inactive),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Updated Test User", "status": "inactive"}));
    }

    #[test]
    fn todo_accepts_null_due_on() {
        let todo: Todo = serde_json::from_str(
            r#"{"id":1,"title":"Walk","due_on":null,"user_id":9,"status":"pending"}"#,
        )
        .unwrap();
        assert!(todo.due_on.is_none());
        assert_eq!(todo.status, TodoStatus::Pending);
    }

    #[test]
    fn todo_rejects_unknown_status() {
        let result: Result<Todo, _> = serde_json::from_str(
            r#"{"id":1,"title":"Walk","user_id":9,"status":"later"}"#,
        );
        assert!(result.is_err());
    }
}
