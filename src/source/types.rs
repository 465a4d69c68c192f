//! Record types returned by the GitLab API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A record that can be stored as a cache entity
pub trait Entity {
    /// Entity type, used as the index directory name
    const TYPE: &'static str;

    /// Stable key, unique within the entity type
    fn key(&self) -> String;
}

/// GitLab user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub web_url: Option<String>,
}

/// GitLab group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: u64,
    pub name: String,
    pub full_path: String,
    #[serde(default)]
    pub parent_id: Option<u64>,
    #[serde(default)]
    pub web_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// GitLab project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub path_with_namespace: String,
    #[serde(default)]
    pub visibility: Option<String>,
    #[serde(default)]
    pub default_branch: Option<String>,
    #[serde(default)]
    pub web_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_activity_at: Option<DateTime<Utc>>,
}

/// Author summary embedded in merge requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: u64,
    pub username: String,
}

/// GitLab merge request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeRequest {
    pub id: u64,
    pub iid: u64,
    pub project_id: u64,
    pub title: String,
    pub state: String,
    #[serde(default)]
    pub author: Option<UserRef>,
    #[serde(default)]
    pub source_branch: Option<String>,
    #[serde(default)]
    pub target_branch: Option<String>,
    #[serde(default)]
    pub web_url: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub merged_at: Option<DateTime<Utc>>,
}

impl Entity for User {
    const TYPE: &'static str = "gitlab_user";

    fn key(&self) -> String {
        format!("gitlab-user:{}", self.id)
    }
}

impl Entity for Group {
    const TYPE: &'static str = "gitlab_group";

    fn key(&self) -> String {
        format!("gitlab-group:{}", self.id)
    }
}

impl Entity for Project {
    const TYPE: &'static str = "gitlab_project";

    fn key(&self) -> String {
        format!("gitlab-project:{}", self.id)
    }
}

impl Entity for MergeRequest {
    const TYPE: &'static str = "gitlab_merge_request";

    fn key(&self) -> String {
        format!("gitlab-merge-request:{}", self.id)
    }
}
