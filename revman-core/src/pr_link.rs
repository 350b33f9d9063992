//! Pull request link parsing
//!
//! The backend derives the repository and PR number of a task from its link;
//! the creation form uses the same rule to preview what will be shown.

use std::fmt;

use url::Url;

/// Repository coordinates extracted from a GitHub pull request link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubPr {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl fmt::Display for GithubPr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

/// Parse `github.com/<owner>/<repo>/pull/<number>[/...]`
///
/// The scheme is optional. Anything else yields `None`.
pub fn parse_github_pr(link: &str) -> Option<GithubPr> {
    let link = link.trim();
    let with_scheme = if link.starts_with("http://") || link.starts_with("https://") {
        link.to_string()
    } else {
        format!("https://{}", link)
    };

    let url = Url::parse(&with_scheme).ok()?;
    if url.host_str() != Some("github.com") {
        return None;
    }

    let mut segments = url.path_segments()?;
    let owner = segments.next().filter(|s| !s.is_empty())?;
    let repo = segments.next().filter(|s| !s.is_empty())?;
    if segments.next()? != "pull" {
        return None;
    }
    let number = segments.next()?.parse().ok()?;

    Some(GithubPr {
        owner: owner.to_string(),
        repo: repo.to_string(),
        number,
    })
}
