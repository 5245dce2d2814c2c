use serde::Deserialize;

use crate::core::config::ListingSettings;
use crate::schemas::page::PageRequest;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PageQuery {
    #[serde(default)]
    page: Option<i64>,
    #[serde(default)]
    limit: Option<i64>,
}

impl PageQuery {
    pub(crate) fn resolve(&self, listing: &ListingSettings) -> PageRequest {
        PageRequest::new(self.page.unwrap_or(1), listing.clamp_limit(self.limit))
    }
}
