use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The backend tools this client knows how to call and render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolKind {
    Search,
    Ask,
    Read,
    Recommend,
    ListRegions,
    #[serde(rename = "get-regional-availability")]
    RegionalAvailability,
}

impl ToolKind {
    pub const ALL: [ToolKind; 6] = [
        ToolKind::Search,
        ToolKind::Ask,
        ToolKind::Read,
        ToolKind::Recommend,
        ToolKind::ListRegions,
        ToolKind::RegionalAvailability,
    ];

    /// Short identifier used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Search => "search",
            ToolKind::Ask => "ask",
            ToolKind::Read => "read",
            ToolKind::Recommend => "recommend",
            ToolKind::ListRegions => "list-regions",
            ToolKind::RegionalAvailability => "get-regional-availability",
        }
    }

    /// Tool name as the backend registers it.
    pub fn backend_name(self) -> &'static str {
        match self {
            ToolKind::Search => "aws___search_documentation",
            ToolKind::Ask => "aws___ask",
            ToolKind::Read => "aws___read_documentation",
            ToolKind::Recommend => "aws___recommend",
            ToolKind::ListRegions => "aws___list_regions",
            ToolKind::RegionalAvailability => "aws___get_regional_availability",
        }
    }

    pub fn api_path(self) -> &'static str {
        match self {
            ToolKind::Search => "/api/search",
            ToolKind::Ask => "/api/ask",
            ToolKind::Read => "/api/read",
            ToolKind::Recommend => "/api/recommend",
            ToolKind::ListRegions => "/api/list_regions",
            ToolKind::RegionalAvailability => "/api/get_regional_availability",
        }
    }

    /// Resolves either spelling of a tool identifier. Anything unrecognized
    /// falls back to search.
    pub fn from_identifier(identifier: &str) -> ToolKind {
        let id = identifier.trim();
        Self::ALL
            .into_iter()
            .find(|tool| tool.name() == id || tool.backend_name() == id)
            .unwrap_or_else(|| {
                tracing::debug!(identifier = id, "unknown tool identifier, using search");
                ToolKind::Search
            })
    }
}

impl FromStr for ToolKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ToolKind::from_identifier(s))
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
