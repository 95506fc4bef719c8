use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier shared by demo posts (small integers) and local posts
/// (creation timestamps in milliseconds).
///
/// Only equality is meaningful across origins; never read anything into the
/// numeric order of two ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(i64);

impl PostId {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PostId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(PostId)
    }
}

impl From<i64> for PostId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Author {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar: None,
        }
    }
}

impl Default for Author {
    fn default() -> Self {
        Self::named("Author")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default)]
    pub category: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub author: Author,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub code_url: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(default)]
    pub is_local: bool,
}

impl Post {
    /// Hero image for cards; posts without one get a stable placeholder seeded by id.
    pub fn hero_image_url(&self) -> String {
        match &self.hero_image {
            Some(url) => url.clone(),
            None => format!("https://picsum.photos/seed/blog-{}/800/520", self.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub date: DateTime<Utc>,
}

/// Raw form fields as typed by the user. Tags are a single comma separated string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostForm {
    pub title: String,
    pub category: String,
    pub excerpt: String,
    pub content: String,
    pub tags: String,
    pub hero_image: String,
    pub code_url: String,
    pub live_url: String,
}

impl PostForm {
    /// Blank form for a new post.
    pub fn blank() -> Self {
        Self {
            category: "General".to_string(),
            ..Self::default()
        }
    }

    /// Form prefilled from an existing post, for editing.
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            category: post.category.clone(),
            excerpt: post.excerpt.clone(),
            content: post.content.clone(),
            tags: post.tags.join(", "),
            hero_image: post.hero_image.clone().unwrap_or_default(),
            code_url: post.code_url.clone().unwrap_or_default(),
            live_url: post.live_url.clone().unwrap_or_default(),
        }
    }

    pub fn parsed_tags(&self) -> Vec<String> {
        parse_tags(&self.tags)
    }

    /// Markdown shown next to the form while writing.
    pub fn preview_source(&self) -> &str {
        if !self.content.is_empty() {
            &self.content
        } else if !self.excerpt.is_empty() {
            &self.excerpt
        } else {
            "Start writing..."
        }
    }
}

pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .map(|tag| tag.to_string())
        .collect()
}

pub(crate) fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
