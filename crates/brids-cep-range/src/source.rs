//! CEP range sources.
//!
//! [`CorreiosRangeSource`] scrapes the Correios "busca faixa de CEP" pages.
//! It starts with nothing loaded; the first call that needs the state list
//! fetches it, and the first query for a state drains every result page of
//! that state into the [`RangeStore`]. Both stay cached for the lifetime of
//! the source.

use crate::error::{RangeError, Result};
use crate::pagination::PaginationCursor;
use crate::parser::{parse_range_page, parse_states};
use crate::store::{LocationRanges, RangeEntry, RangeStore};
use crate::transport::{HttpTransport, Transport};
use brids_core::{CorreiosConfig, StateCode};

const STATES_PATH: &str = "sistemas/buscacep/buscaFaixaCep.cfm";
const RANGES_PATH: &str = "sistemas/buscacep/resultadoBuscaFaixaCEP.cfm";

/// Provider of CEP ranges per state and location.
pub trait CepRangeSource {
    /// The valid state codes, in upstream order.
    fn valid_states(&mut self) -> Result<Vec<StateCode>>;

    /// Every range of `state`, location by location.
    fn ranges_by_state(&mut self, state: &str) -> Result<Vec<RangeEntry>>;

    /// The ranges attributed to `location` in `state`.
    ///
    /// `location` must match the scraped name exactly, accents included.
    fn ranges_by_location(&mut self, state: &str, location: &str) -> Result<Vec<RangeEntry>>;
}

impl<S: CepRangeSource + ?Sized> CepRangeSource for &mut S {
    fn valid_states(&mut self) -> Result<Vec<StateCode>> {
        (**self).valid_states()
    }

    fn ranges_by_state(&mut self, state: &str) -> Result<Vec<RangeEntry>> {
        (**self).ranges_by_state(state)
    }

    fn ranges_by_location(&mut self, state: &str, location: &str) -> Result<Vec<RangeEntry>> {
        (**self).ranges_by_location(state, location)
    }
}

/// [`CepRangeSource`] backed by the Correios website.
pub struct CorreiosRangeSource<T: Transport = HttpTransport> {
    transport: T,
    root_url: String,
    states: Option<Vec<StateCode>>,
    store: RangeStore,
}

impl CorreiosRangeSource<HttpTransport> {
    /// Source with the default configuration.
    pub fn new() -> Result<Self> {
        Self::from_config(&CorreiosConfig::default())
    }

    /// Source using the root URL, user agent and timeout from `config`.
    pub fn from_config(config: &CorreiosConfig) -> Result<Self> {
        let transport = HttpTransport::from_config(config)?;
        Ok(Self::with_transport(transport, &config.root_url))
    }
}

impl<T: Transport> CorreiosRangeSource<T> {
    /// Source over an arbitrary transport.
    pub fn with_transport(transport: T, root_url: &str) -> Self {
        Self {
            transport,
            root_url: root_url.trim_end_matches('/').to_string(),
            states: None,
            store: RangeStore::new(),
        }
    }

    /// The transport, for inspection in tests.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Ranges cached so far.
    #[must_use]
    pub fn store(&self) -> &RangeStore {
        &self.store
    }

    /// Site root without a trailing slash.
    #[must_use]
    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    fn states_url(&self) -> String {
        format!("{}/{}", self.root_url, STATES_PATH)
    }

    fn ranges_url(&self) -> String {
        format!("{}/{}", self.root_url, RANGES_PATH)
    }

    /// Close the transport before handing an upstream failure to the caller.
    fn fail<V>(&mut self, err: RangeError) -> Result<V> {
        tracing::warn!("Correios request failed, closing client: {}", err);
        self.transport.close();
        Err(err)
    }

    fn load_states(&mut self) -> Result<&[StateCode]> {
        if self.states.is_none() {
            let url = self.states_url();
            let states = match self.transport.get(&url).and_then(|html| parse_states(&html)) {
                Ok(states) => states,
                Err(err) => return self.fail(err),
            };
            tracing::debug!("Loaded {} valid states", states.len());
            self.states = Some(states);
        }

        Ok(self.states.as_deref().unwrap_or_default())
    }

    /// Resolve `state` against the valid set, loading the set if needed.
    fn known_state(&mut self, state: &str) -> Result<StateCode> {
        let unknown = || RangeError::UnknownState(state.to_string());
        let code = StateCode::new(state).map_err(|_| unknown())?;

        if self.load_states()?.contains(&code) {
            Ok(code)
        } else {
            Err(unknown())
        }
    }

    /// Fetch and cache every page of `state` unless it is cached already.
    fn ensure_cached(&mut self, state: &StateCode) -> Result<()> {
        if self.store.is_cached(state) {
            tracing::debug!("Ranges for {} served from cache", state);
            return Ok(());
        }

        let url = self.ranges_url();
        let mut ranges = LocationRanges::new();
        let mut cursor = PaginationCursor::default();
        let mut pages = 0_usize;

        loop {
            let form = cursor.form_fields(state.as_str());
            let page = match self
                .transport
                .post_form(&url, &form)
                .and_then(|html| parse_range_page(&html))
            {
                Ok(page) => page,
                Err(err) => return self.fail(err),
            };

            pages += 1;
            tracing::debug!(
                "Page {} of {}: {} ranges, more: {}",
                pages,
                state,
                page.ranges.len(),
                page.cursor.has_more()
            );

            ranges.extend(page.ranges);
            cursor = page.cursor;

            if !cursor.has_more() {
                break;
            }
        }

        tracing::info!(
            "Cached {} ranges in {} locations for {} ({} pages)",
            ranges.len(),
            ranges.locations().count(),
            state,
            pages
        );
        self.store.insert_state(state.clone(), ranges);
        Ok(())
    }
}

impl<T: Transport> CepRangeSource for CorreiosRangeSource<T> {
    fn valid_states(&mut self) -> Result<Vec<StateCode>> {
        self.load_states().map(<[StateCode]>::to_vec)
    }

    fn ranges_by_state(&mut self, state: &str) -> Result<Vec<RangeEntry>> {
        let code = self.known_state(state)?;
        self.ensure_cached(&code)?;
        Ok(self.store.ranges_by_state(&code).unwrap_or_default())
    }

    fn ranges_by_location(&mut self, state: &str, location: &str) -> Result<Vec<RangeEntry>> {
        let code = self.known_state(state)?;
        self.ensure_cached(&code)?;
        self.store
            .ranges_by_location(&code, location)
            .map(<[RangeEntry]>::to_vec)
            .ok_or_else(|| RangeError::UnknownLocation {
                state: code.to_string(),
                location: location.to_string(),
            })
    }
}

impl<T: Transport> std::fmt::Debug for CorreiosRangeSource<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CorreiosRangeSource")
            .field("root_url", &self.root_url)
            .field("states_loaded", &self.states.is_some())
            .field("cached_states", &self.store.cached_states().count())
            .finish_non_exhaustive()
    }
}
