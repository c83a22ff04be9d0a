//! Launch link handling
//!
//! QR labels encode a link such as `https://forms.example/scan?task=86a1b2`.
//! The `task` query parameter pre-fills the task field and is the fallback
//! task id at submit time.

use url::{form_urlencoded, Url};

/// Query parameter carrying the task id
pub const TASK_PARAM: &str = "task";

/// Parameters extracted from the link the form was opened with
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchLink {
    pub task: Option<String>,
}

impl LaunchLink {
    /// Parse a full URL or a bare query string (`task=...`, `?task=...`)
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let task = match Url::parse(raw) {
            Ok(url) => find_param(url.query_pairs(), TASK_PARAM),
            Err(_) => {
                let query = raw.rsplit_once('?').map_or(raw, |(_, query)| query);
                find_param(form_urlencoded::parse(query.as_bytes()), TASK_PARAM)
            }
        };
        Self { task }
    }

    /// The task id, if present and not blank
    pub fn task(&self) -> Option<&str> {
        self.task.as_deref()
    }
}

fn find_param<'a>(
    pairs: impl Iterator<Item = (std::borrow::Cow<'a, str>, std::borrow::Cow<'a, str>)>,
    name: &str,
) -> Option<String> {
    pairs
        .filter(|(key, _)| key == name)
        .map(|(_, value)| value.trim().to_string())
        .find(|value| !value.is_empty())
}
