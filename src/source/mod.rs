//! Record source: paginated GitLab API fetching
//!
//! The cache never calls into this module. The collector fetches records
//! here and hands them to the cache writer.

pub mod client;
pub mod paginate;
pub mod types;

pub use client::GitlabClient;
pub use paginate::{fetch_all, Page, PageSource};
pub use types::{Entity, Group, MergeRequest, Project, User};

use crate::error::CacheError;
use std::fmt;
use std::str::FromStr;

/// Top-level resources that can be collected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Users,
    Groups,
    Projects,
    MergeRequests,
}

impl Resource {
    /// API path of the collection
    pub fn api_path(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Groups => "groups",
            Self::Projects => "projects",
            Self::MergeRequests => "merge_requests",
        }
    }

    /// Entity type the records are indexed under
    pub fn entity_type(&self) -> &'static str {
        match self {
            Self::Users => User::TYPE,
            Self::Groups => Group::TYPE,
            Self::Projects => Project::TYPE,
            Self::MergeRequests => MergeRequest::TYPE,
        }
    }

    /// Default collection step name
    pub fn default_step(&self) -> String {
        format!("fetch-{}", self.api_path().replace('_', "-"))
    }

    pub fn all() -> &'static [Self] {
        &[
            Self::Users,
            Self::Groups,
            Self::Projects,
            Self::MergeRequests,
        ]
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.api_path())
    }
}

impl FromStr for Resource {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "users" | "user" => Ok(Self::Users),
            "groups" | "group" => Ok(Self::Groups),
            "projects" | "project" => Ok(Self::Projects),
            "merge_requests" | "merge_request" | "mrs" => Ok(Self::MergeRequests),
            _ => Err(CacheError::UnknownResource(s.to_string())),
        }
    }
}
