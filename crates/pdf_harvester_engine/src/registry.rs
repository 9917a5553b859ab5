use thiserror::Error;
use url::Url;

use crate::adapters::SiteAdapter;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("site `{0}` is already registered")]
    Duplicate(String),
    #[error("unknown site `{0}`")]
    UnknownSite(String),
    #[error("invalid listing url for `{id}`: {message}")]
    InvalidListingUrl { id: String, message: String },
}

/// One harvestable site: where its listing page lives and how to read it.
pub struct Site {
    id: String,
    listing_url: Url,
    adapter: Box<dyn SiteAdapter>,
}

impl Site {
    pub fn new(
        id: impl Into<String>,
        listing_url: &str,
        adapter: impl SiteAdapter + 'static,
    ) -> Result<Self, RegistryError> {
        let id = id.into();
        let listing_url = Url::parse(listing_url).map_err(|err| RegistryError::InvalidListingUrl {
            id: id.clone(),
            message: err.to_string(),
        })?;
        Ok(Self {
            id,
            listing_url,
            adapter: Box::new(adapter),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn listing_url(&self) -> &Url {
        &self.listing_url
    }

    pub fn adapter(&self) -> &dyn SiteAdapter {
        self.adapter.as_ref()
    }
}

impl std::fmt::Debug for Site {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Site")
            .field("id", &self.id)
            .field("listing_url", &self.listing_url.as_str())
            .field("adapter", &self.adapter.name())
            .finish()
    }
}

/// Sites known to the caller, in registration order.
#[derive(Debug, Default)]
pub struct SiteRegistry {
    sites: Vec<Site>,
}

impl SiteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, site: Site) -> Result<(), RegistryError> {
        if self.get(site.id()).is_some() {
            return Err(RegistryError::Duplicate(site.id));
        }
        self.sites.push(site);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Site> {
        self.sites.iter().find(|site| site.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Site> {
        self.sites.iter()
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Resolve `ids` in the given order; an empty selection means every site.
    pub fn select<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<&Site>, RegistryError> {
        if ids.is_empty() {
            return Ok(self.sites.iter().collect());
        }
        ids.iter()
            .map(|id| {
                self.get(id.as_ref())
                    .ok_or_else(|| RegistryError::UnknownSite(id.as_ref().to_string()))
            })
            .collect()
    }
}
