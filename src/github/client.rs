//! Octocrab client wrapper scoped to a specific repository.
//!
//! `GitHubEffect` variants don't carry repository information; the client a
//! webhook's effects run through is built for the repository named in that
//! webhook's payload.

use octocrab::Octocrab;

use crate::types::RepoId;

/// A GitHub API client scoped to a specific repository.
#[derive(Clone)]
pub struct OctocrabClient {
    /// The underlying octocrab client.
    client: Octocrab,

    /// The repository this client is scoped to.
    repo: RepoId,
}

impl OctocrabClient {
    /// Creates a new client scoped to the given repository.
    ///
    /// `Octocrab` is cheap to clone, so one shared instance can back a
    /// client per request.
    pub fn new(client: Octocrab, repo: RepoId) -> Self {
        Self { client, repo }
    }

    /// Builds an octocrab instance authenticated with a token.
    ///
    /// Works with personal access tokens and GitHub App installation tokens.
    /// `base_uri` overrides `https://api.github.com`, e.g. for GitHub
    /// Enterprise Server.
    pub fn build_octocrab(
        token: impl Into<String>,
        base_uri: Option<&str>,
    ) -> Result<Octocrab, octocrab::Error> {
        let token: String = token.into();
        let mut builder = Octocrab::builder();
        if let Some(base_uri) = base_uri {
            builder = builder.base_uri(base_uri)?;
        }
        builder.personal_token(token).build()
    }

    /// Returns a reference to the underlying octocrab client.
    pub fn inner(&self) -> &Octocrab {
        &self.client
    }

    /// Returns the repository this client is scoped to.
    pub fn repo(&self) -> &RepoId {
        &self.repo
    }

    /// Returns the repository owner.
    pub fn owner(&self) -> &str {
        &self.repo.owner
    }

    /// Returns the repository name.
    pub fn repo_name(&self) -> &str {
        &self.repo.repo
    }
}

impl std::fmt::Debug for OctocrabClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OctocrabClient")
            .field("repo", &self.repo)
            .finish_non_exhaustive()
    }
}
