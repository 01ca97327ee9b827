//! Pin icons: static glyphs per kind, and favicons for URL pins.
//!
//! Favicons are downloaded on the background pool and cached per host.
//! A host is fetched at most once at a time; repeated requests while a fetch
//! is in flight are skipped rather than queued. Failed hosts are cached as
//! misses so they are not retried every frame.

use crate::background::{BackgroundExecutor, TaskResult};
use crate::constants::FAVICON_TIMEOUT_SECS;
use crate::launcher::normalize_target;
use crate::types::PinKind;
use anyhow::Context;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;
use tracing::{debug, warn};

/// Glyph drawn for a pin without a better icon
pub fn default_glyph(kind: PinKind) -> &'static str {
    match kind {
        PinKind::File => "📄",
        PinKind::Folder => "📁",
        PinKind::Url => "🔗",
        PinKind::Note => "📝",
    }
}

/// Decoded favicon, RGBA8
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Favicon {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Favicon {
    /// Decode any format the `image` crate understands (ICO, PNG, ...).
    pub fn decode(bytes: &[u8]) -> anyhow::Result<Self> {
        let image = image::load_from_memory(bytes).context("undecodable favicon")?;
        let rgba = image.to_rgba8();
        Ok(Self {
            width: rgba.width(),
            height: rgba.height(),
            rgba: rgba.into_raw(),
        })
    }
}

/// Lowercased host of a URL, accepting bare `www.` links.
pub fn host_of(url: &str) -> Option<String> {
    let parsed = reqwest::Url::parse(&normalize_target(url)).ok()?;
    parsed.host_str().map(str::to_lowercase)
}

/// Downloads the favicon of one host. Runs on a worker thread.
pub trait FaviconFetcher: Send + Sync {
    fn fetch(&self, host: &str) -> anyhow::Result<Favicon>;
}

/// Fetches `https://<host>/favicon.ico` with a blocking client.
pub struct HttpFaviconFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFaviconFetcher {
    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(FAVICON_TIMEOUT_SECS))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl FaviconFetcher for HttpFaviconFetcher {
    fn fetch(&self, host: &str) -> anyhow::Result<Favicon> {
        let url = format!("https://{host}/favicon.ico");
        let response = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("request to {url} failed"))?
            .error_for_status()?;
        let bytes = response.bytes()?;
        Favicon::decode(&bytes)
    }
}

type FetchOutcome = (String, Option<Favicon>);

/// Host-keyed favicon cache fed by background fetches.
pub struct FaviconService {
    fetcher: Arc<dyn FaviconFetcher>,
    executor: BackgroundExecutor,
    cache: HashMap<String, Option<Arc<Favicon>>>,
    in_flight: HashSet<String>,
    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,
}

impl FaviconService {
    pub fn new(fetcher: Arc<dyn FaviconFetcher>, executor: BackgroundExecutor) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            fetcher,
            executor,
            cache: HashMap::new(),
            in_flight: HashSet::new(),
            tx,
            rx,
        }
    }

    /// Service backed by [`HttpFaviconFetcher`] on the default worker pool.
    pub fn with_http() -> anyhow::Result<Self> {
        Ok(Self::new(
            Arc::new(HttpFaviconFetcher::new()?),
            BackgroundExecutor::with_default_workers(),
        ))
    }

    /// Start fetching the favicon for a URL's host. Returns `false` when the
    /// host is unparseable, already cached, or already being fetched.
    pub fn request(&mut self, url: &str) -> bool {
        let Some(host) = host_of(url) else {
            return false;
        };
        if self.cache.contains_key(&host) || !self.in_flight.insert(host.clone()) {
            return false;
        }

        debug!(%host, "Fetching favicon");
        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.tx.clone();
        let task_host = host.clone();
        self.executor.spawn(
            "favicon",
            move || fetcher.fetch(&task_host).map_err(|e| format!("{e:#}")),
            move |result: TaskResult<Favicon>| {
                let icon = match result {
                    Ok(icon) => Some(icon),
                    Err(e) => {
                        warn!(%host, "Favicon fetch failed: {}", e);
                        None
                    }
                };
                let _ = tx.send((host, icon));
            },
        );
        true
    }

    /// Move finished fetches into the cache. Returns how many hosts resolved.
    pub fn poll(&mut self) -> usize {
        self.executor.process_results();
        let mut resolved = 0;
        while let Ok((host, icon)) = self.rx.try_recv() {
            self.in_flight.remove(&host);
            self.cache.insert(host, icon.map(Arc::new));
            resolved += 1;
        }
        resolved
    }

    /// Cached favicon for a URL, if one was fetched successfully.
    pub fn get(&self, url: &str) -> Option<Arc<Favicon>> {
        let host = host_of(url)?;
        self.cache.get(&host).cloned().flatten()
    }

    pub fn is_in_flight(&self, url: &str) -> bool {
        host_of(url).is_some_and(|h| self.in_flight.contains(&h))
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }
}
