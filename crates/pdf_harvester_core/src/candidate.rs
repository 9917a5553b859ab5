use std::fmt;

use serde::Serialize;
use url::Url;

/// An absolute URL believed to reference a target document.
///
/// Only constructed from an already-parsed [`Url`], so it never needs a base.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CandidateUrl(Url);

impl CandidateUrl {
    pub fn new(url: Url) -> Self {
        Self(url)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    pub fn into_url(self) -> Url {
        self.0
    }
}

impl From<Url> for CandidateUrl {
    fn from(url: Url) -> Self {
        Self(url)
    }
}

impl AsRef<str> for CandidateUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CandidateUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
