//! Paths of the remote API, relative to the base URL.

pub fn users() -> String {
    "/users".to_string()
}

pub fn user(id: u64) -> String {
    format!("/users/{id}")
}

pub fn user_posts(user_id: u64) -> String {
    format!("/users/{user_id}/posts")
}

pub fn user_todos(user_id: u64) -> String {
    format!("/users/{user_id}/todos")
}

pub fn posts() -> String {
    "/posts".to_string()
}

pub fn post(id: u64) -> String {
    format!("/posts/{id}")
}

pub fn todos() -> String {
    "/todos".to_string()
}

pub fn todo(id: u64) -> String {
    format!("/todos/{id}")
}
