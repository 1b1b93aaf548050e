use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Body of `GET /1.1/search/tweets.json`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub statuses: Vec<Status>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Status {
    pub id_str: Option<String>,
    pub full_text: String,
    pub created_at: Option<String>,
    pub user: Option<User>,
}

impl Status {
    // NB: v1.1 timestamps look like "Wed Oct 10 20:19:24 +0000 2018"
    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        let created_at = self.created_at.as_ref()?;
        DateTime::parse_from_str(created_at, "%a %b %d %H:%M:%S %z %Y").ok()
    }

    pub fn author_screen_name(&self, fill_unknown_with: &str) -> String {
        self.user
            .as_ref()
            .map(|user| user.screen_name.clone())
            .unwrap_or(fill_unknown_with.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    pub id_str: Option<String>,
    pub name: String,
    pub screen_name: String,
}
