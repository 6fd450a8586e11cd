//! Authors and posts, and their record form.

use crate::effects::Record;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
}

impl Author {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl From<Author> for Record {
    fn from(author: Author) -> Self {
        let mut record = Record::new();
        record.insert("name".to_string(), Value::String(author.name));
        record
    }
}

/// A post. Displays as `Post => {title}:\n{body}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    pub body: String,
}

impl Post {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Read a post back from a stored record. Missing or non-string fields
    /// read as empty text.
    pub fn from_record(record: &Record) -> Self {
        let field = |name: &str| {
            record
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Self {
            title: field("title"),
            body: field("body"),
        }
    }
}

impl From<Post> for Record {
    fn from(post: Post) -> Self {
        let mut record = Record::new();
        record.insert("title".to_string(), Value::String(post.title));
        record.insert("body".to_string(), Value::String(post.body));
        record
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Post => {}:\n{}", self.title, self.body)
    }
}
