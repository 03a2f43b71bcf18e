//! Station lookup for selection widgets.
//!
//! [`StationLookup`] is the narrow interface a query editor needs: given a search
//! term, return candidate stations. [`candidate_stations`] applies the editor's
//! display policy on top of it.

use crate::datasource::MeteostatDatasource;
use crate::error::DatasourceError;
use crate::transport::Transport;
use crate::types::station::{StationOption, StationSearchResponse};
use std::future::Future;

/// Search terms shorter than this (in characters) are not sent to the API.
pub const MIN_SEARCH_TERM_LEN: usize = 3;

pub trait StationLookup: Send + Sync {
    fn search_stations(
        &self,
        term: &str,
    ) -> impl Future<Output = Result<StationSearchResponse, DatasourceError>> + Send;
}

impl<T: Transport> StationLookup for MeteostatDatasource<T> {
    async fn search_stations(&self, term: &str) -> Result<StationSearchResponse, DatasourceError> {
        MeteostatDatasource::search_stations(self, term).await
    }
}

/// The options a station picker offers for `term`.
///
/// Terms shorter than [`MIN_SEARCH_TERM_LEN`] yield no options and no lookup.
/// Inactive stations are left out; each option is labelled with the English
/// station name.
pub async fn candidate_stations<L: StationLookup>(
    lookup: &L,
    term: &str,
) -> Result<Vec<StationOption>, DatasourceError> {
    if term.chars().count() < MIN_SEARCH_TERM_LEN {
        return Ok(Vec::new());
    }

    let response = lookup.search_stations(term).await?;
    Ok(response
        .data
        .iter()
        .filter(|station| station.active)
        .map(StationOption::from_descriptor)
        .collect())
}
