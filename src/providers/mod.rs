pub mod noaa;
pub mod meteofrance;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;
use async_recursion::async_recursion;
use async_trait::async_trait;
use chrono::{DateTime, Duration, DurationRound, Utc};
use log::{debug, error, info};
use tokio::sync::RwLock;
use crate::config::ProviderConfig;
use crate::error::Result;
use crate::stamp::Stamp;
use crate::{transcode, webhook};
use crate::providers::meteofrance::MeteoFrance;
use crate::providers::noaa::Noaa;

/// Forecasts produced for the same valid time but by different reference
/// runs, plus the bookkeeping the query surface and the scheduler need.
/// `forecasts` maps a valid-time key (`YYYYMMDDHH`) to the filenames that
/// produced it, newest reference run last.
pub struct Status {
    pub forecasts: BTreeMap<String, Vec<String>>,
    pub last_ref_time: Option<DateTime<Utc>>,
    pub last_forecast_hour: Option<i64>,
    pub progress: u8,
}

impl Status {
    fn empty() -> Self {
        Self { forecasts: BTreeMap::new(), last_ref_time: None, last_forecast_hour: None, progress: 0 }
    }

    fn set_last(&mut self, stamp: Stamp, h: i64, max_forecast: i64) {
        self.last_ref_time = Some(stamp.ref_time);
        self.last_forecast_hour = Some(h);
        self.progress = if max_forecast > 0 { (100 * h / max_forecast) as u8 } else { 0 };
    }
}

/// Whether a provider fires its refresh webhook after each artifact or once
/// per tick. NOAA fires per-artifact; every other provider batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookMode {
    PerArtifact,
    PerTick,
}

pub struct ProviderState {
    pub id: String,
    pub name: String,
    pub grib_dir: PathBuf,
    pub json_dir: PathBuf,
    pub step: i64,
    pub max_forecast: AtomicI64,
    pub webhook: Option<String>,
    pub next_update_time: DateTime<Utc>,
    pub next_ref_time: DateTime<Utc>,
    pub busy: AtomicBool,
    pub status: RwLock<Status>,
    pub http: reqwest::Client,
    pub transcoder: Arc<dyn transcode::Transcoder>,
}

impl ProviderState {
    pub fn new(id: &str, name: &str, grib_dir: PathBuf, json_dir: PathBuf, step: i64, max_forecast: i64, webhook: Option<String>) -> Result<Self> {
        create_dir(&grib_dir)?;
        create_dir(&json_dir)?;

        let now = Stamp::now();

        Ok(Self {
            id: id.to_string(),
            name: name.to_string(),
            grib_dir,
            json_dir,
            step,
            max_forecast: AtomicI64::new(max_forecast),
            webhook,
            next_update_time: now.ref_time + Duration::hours(3) + Duration::minutes(30),
            next_ref_time: now.ref_time,
            busy: AtomicBool::new(false),
            status: RwLock::new(Status::empty()),
            http: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(600))
                .build()
                .expect("build reqwest client"),
            transcoder: Arc::new(transcode::ExternalTranscoder),
        })
    }

    pub fn max_forecast(&self) -> i64 {
        self.max_forecast.load(Ordering::Relaxed)
    }
}

fn create_dir(dir: &PathBuf) -> Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
        info!("{:?} created successfully", dir);
    }
    Ok(())
}

/// The capability set every upstream source implements. The ingestion engine
/// below is generic over this trait and is not duplicated per source.
#[async_trait]
pub trait Provider: Send + Sync {
    fn state(&self) -> &ProviderState;

    fn webhook_mode(&self) -> WebhookMode {
        WebhookMode::PerTick
    }

    /// Re-discover the provider's forecast horizon for `stamp`'s reference
    /// run, if the upstream exposes one dynamically. No-op by default.
    async fn refresh_horizon(&self, _stamp: Stamp) {}

    /// Attempt to produce `<gribDir>/<filename(offset)>` for `stamp` atomically.
    /// `Ok(true)`: fetched. `Ok(false)`: upstream has nothing yet (e.g. 404).
    /// `Err`: transient transport failure.
    async fn fetch(&self, stamp: Stamp, offset: i64) -> Result<bool>;
}

pub type SharedProvider = Arc<dyn Provider>;

pub async fn start_provider(config: &ProviderConfig) -> Result<Option<SharedProvider>> {
    match config {
        ProviderConfig::Noaa(c) if !c.enabled => Ok(None),
        ProviderConfig::Noaa(c) => {
            let provider: SharedProvider = Arc::new(Noaa::from_config(c)?);
            launch(provider.clone()).await?;
            Ok(Some(provider))
        }
        ProviderConfig::Meteofrance(c) if !c.enabled => Ok(None),
        ProviderConfig::Meteofrance(c) => {
            let provider: SharedProvider = Arc::new(MeteoFrance::from_config(c).await?);
            launch(provider.clone()).await?;
            Ok(Some(provider))
        }
    }
}

async fn launch(provider: SharedProvider) -> Result<()> {
    let built = rebuild(provider.state())?;
    *provider.state().status.write().await = built;

    let status = provider.state().status.read().await;
    if let Some(last) = status.last_forecast_hour {
        info!("{} - loaded, last forecast hour {}, {}%", provider.state().id, last, status.progress);
    }
    drop(status);

    spawn_scheduler(provider);
    Ok(())
}

/// Walk the GRIB directory and rebuild the index from whatever is already on
/// disk. A single unparseable name aborts the provider's startup rather than
/// silently truncating the index.
pub fn rebuild(state: &ProviderState) -> Result<Status> {
    let mut files: Vec<String> = std::fs::read_dir(&state.grib_dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| !name.ends_with(".tmp"))
        .collect();
    files.sort();

    let mut status = Status::empty();
    let max_forecast = state.max_forecast();
    let n = files.len();

    for (i, file) in files.iter().enumerate() {
        let (stamp, offset) = Stamp::parse_filename(file)?;
        let forecast_hour = stamp.from_now(offset);

        if forecast_hour < -3 && i < n - 1 {
            info!("{} - delete stale `{}`", state.id, file);
            delete_artifact(state, file);
            continue;
        }

        let key = stamp.key(offset);
        let found_before = status.forecasts.contains_key(&key);

        if forecast_hour >= 3 && found_before {
            if let Some(superseded) = status.forecasts.remove(&key) {
                for old in &superseded {
                    info!("{} - delete superseded `{}`", state.id, old);
                    delete_artifact(state, old);
                }
            }
        }

        if !found_before || forecast_hour >= 0 {
            status.forecasts.entry(key).or_default().push(file.clone());
        }

        status.set_last(stamp, offset, max_forecast);
    }

    Ok(status)
}

fn delete_artifact(state: &ProviderState, filename: &str) {
    if let Err(e) = std::fs::remove_file(state.grib_dir.join(filename)) {
        error!("{} - error removing grib `{}`: {}", state.id, filename, e);
    }
    if let Err(e) = std::fs::remove_file(state.json_dir.join(filename)) {
        error!("{} - error removing json `{}`: {}", state.id, filename, e);
    }
}

/// Drop every artifact whose valid time is older than `now - 3h`.
async fn clean(state: &ProviderState) {
    let cutoff = Utc::now() - Duration::hours(3);

    let stale: Vec<String> = {
        let status = state.status.read().await;
        status.forecasts.keys()
            .filter(|key| key_to_time(key).map(|t| t < cutoff).unwrap_or(false))
            .cloned()
            .collect()
    };

    if stale.is_empty() {
        return;
    }

    let mut status = state.status.write().await;
    for key in stale {
        if let Some(files) = status.forecasts.remove(&key) {
            for file in files {
                info!("{} - clean `{}`", state.id, file);
                delete_artifact(state, &file);
            }
        }
    }
}

fn key_to_time(key: &str) -> Option<DateTime<Utc>> {
    chrono::NaiveDateTime::parse_from_str(&format!("{key}0000"), "%Y%m%d%H%M%S")
        .ok()
        .map(|naive| DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc))
}

/// Starting at `h = 0`, fetch whatever is missing for `t`'s reference run up
/// to the provider's horizon. Recurses onto the 6h-earlier reference run
/// when nothing at all was available yet.
#[async_recursion]
async fn next(provider: &(dyn Provider + 'static), t: Stamp, mut first: bool) -> bool {
    let state = provider.state();
    let mut h = 0i64;
    let mut something_new = false;

    while h <= state.max_forecast() {
        let fh = t.from_now(h);
        let key = t.key(h);

        let already_current = fh <= 0 && state.status.read().await.forecasts.contains_key(&key);
        if fh <= -3 || already_current {
            h += state.step;
            continue;
        }

        if state.grib_dir.join(t.filename(h)).exists() {
            h += state.step;
            first = false;
            continue;
        }

        if first {
            provider.refresh_horizon(t).await;
        }

        match provider.fetch(t, h).await {
            Ok(true) => {
                if let Err(e) = finish_artifact(provider, t, h, fh, &key).await {
                    error!("{} - error finishing `{}`: {:?}", state.id, t.filename(h), e);
                    break;
                }
                something_new = true;
            }
            Ok(false) => {
                if first {
                    return next(provider, t.six_hours_earlier(), true).await;
                }
                break;
            }
            Err(e) => {
                error!("{} - error fetching `{}`: {:?}", state.id, t.filename(h), e);
                break;
            }
        }

        h += state.step;
        first = false;
    }

    something_new
}

/// After a successful fetch, transcode first; only once the JSON exists do we
/// touch the index — supersede the prior run's artifact if the valid time is
/// still ≥3h out, and record the new filename. A transcode failure must leave
/// whatever was previously served untouched.
async fn finish_artifact(provider: &(dyn Provider + 'static), t: Stamp, h: i64, fh: i64, key: &str) -> Result<()> {
    let state = provider.state();
    let filename = t.filename(h);

    state.transcoder.transcode(&state.grib_dir.join(&filename), &state.json_dir.join(&filename)).await?;

    let had_entries = state.status.read().await.forecasts.get(key).map(|v| !v.is_empty()).unwrap_or(false);
    if fh >= 3 && had_entries {
        let superseded = state.status.write().await.forecasts.remove(key);
        if let Some(superseded) = superseded {
            for old in &superseded {
                info!("{} - supersede `{}`", state.id, old);
                delete_artifact(state, old);
            }
        }
    }

    {
        let mut status = state.status.write().await;
        status.forecasts.entry(key.to_string()).or_default().push(filename.clone());
        status.set_last(t, h, state.max_forecast());
    }

    info!("{} - `{}` : {}%", state.id, filename, state.status.read().await.progress);

    if provider.webhook_mode() == WebhookMode::PerArtifact {
        if let Some(url) = &state.webhook {
            webhook::notify(&state.http, url).await;
        }
    }

    Ok(())
}

/// A tick drops instead of queuing if a previous one is still running; the
/// busy flag is always cleared on the way out, success or failure.
pub async fn tick(provider: &(dyn Provider + 'static)) {
    let state = provider.state();
    if state.busy.swap(true, Ordering::SeqCst) {
        debug!("{} - tick already running, skipping", state.id);
        return;
    }
    let _guard = BusyGuard { busy: &state.busy };

    debug!("{} - clean", state.id);
    clean(state).await;

    debug!("{} - fetch", state.id);
    let t = Stamp::now();
    let produced = next(provider, t, true).await;

    if produced && provider.webhook_mode() == WebhookMode::PerTick {
        if let Some(url) = &state.webhook {
            webhook::notify(&state.http, url).await;
        }
    }
}

struct BusyGuard<'a> {
    busy: &'a AtomicBool,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::SeqCst);
    }
}

fn spawn_scheduler(provider: SharedProvider) {
    tokio::spawn(async move {
        let now = Utc::now();
        let aligned = now.duration_trunc(Duration::minutes(5)).unwrap_or(now) + Duration::minutes(5);
        if let Ok(delay) = (aligned - now).to_std() {
            tokio::time::sleep(delay).await;
        }

        loop {
            tick(provider.as_ref()).await;
            tokio::time::sleep(std::time::Duration::from_secs(300)).await;
        }
    });
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::atomic::AtomicUsize;
    use super::*;
    use tempfile::tempdir;
    use crate::transcode::Transcoder;

    /// Always succeeds without shelling out, for tests that need a fetch's
    /// transcode step to go through deterministically.
    struct StubTranscoder;

    #[async_trait]
    impl Transcoder for StubTranscoder {
        async fn transcode(&self, _grib_path: &Path, json_path: &Path) -> Result<()> {
            std::fs::write(json_path, b"json")?;
            Ok(())
        }
    }

    /// A `Provider` whose `fetch` is never exercised, for tests that drive
    /// `finish_artifact` directly with a caller-supplied forecast hour.
    struct Stub(ProviderState);

    #[async_trait]
    impl Provider for Stub {
        fn state(&self) -> &ProviderState {
            &self.0
        }

        async fn fetch(&self, _stamp: Stamp, _offset: i64) -> Result<bool> {
            Ok(false)
        }
    }

    fn state(max_forecast: i64) -> ProviderState {
        let grib = tempdir().unwrap().keep();
        let json = tempdir().unwrap().keep();
        ProviderState::new("test", "Test", grib, json, 3, max_forecast, None).unwrap()
    }

    fn touch(state: &ProviderState, stamp: Stamp, offset: i64) {
        std::fs::write(state.grib_dir.join(stamp.filename(offset)), b"grib").unwrap();
    }

    #[test]
    fn rebuild_indexes_existing_files_by_valid_time() {
        let state = state(384);
        let now = Stamp::now();
        touch(&state, now, 6);
        touch(&state, now, 9);

        let status = rebuild(&state).unwrap();

        assert_eq!(status.forecasts.len(), 2);
        assert!(status.forecasts.contains_key(&now.key(6)));
        assert!(status.forecasts.contains_key(&now.key(9)));
        assert_eq!(status.last_forecast_hour, Some(9));
    }

    #[test]
    fn rebuild_supersedes_older_run_when_valid_time_still_far_out() {
        let state = state(384);
        let newer = Stamp::now();
        let older = newer.six_hours_earlier();

        // both runs cover the same valid time; the margin (12h/18h) stays
        // >= 3h out even at the edge of the 6h reference-run cycle.
        let newer_offset = 12;
        let older_offset = 18;

        touch(&state, older, older_offset);
        touch(&state, newer, newer_offset);

        let status = rebuild(&state).unwrap();

        let key = newer.key(newer_offset);
        let entries = status.forecasts.get(&key).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0], newer.filename(newer_offset));
        assert!(!state.grib_dir.join(older.filename(older_offset)).exists());
    }

    #[tokio::test]
    async fn tick_releases_the_busy_flag_even_when_nothing_is_fetched() {
        struct NeverFetches(ProviderState);

        #[async_trait]
        impl Provider for NeverFetches {
            fn state(&self) -> &ProviderState {
                &self.0
            }

            async fn fetch(&self, _stamp: Stamp, _offset: i64) -> Result<bool> {
                Ok(false)
            }
        }

        let provider = NeverFetches(state(0));
        tick(&provider).await;

        assert!(!provider.state().busy.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn next_cascades_back_through_several_unpublished_reference_runs() {
        struct Cascading {
            state: ProviderState,
            calls: AtomicUsize,
        }

        #[async_trait]
        impl Provider for Cascading {
            fn state(&self) -> &ProviderState {
                &self.state
            }

            async fn fetch(&self, _stamp: Stamp, _offset: i64) -> Result<bool> {
                let call = self.calls.fetch_add(1, Ordering::SeqCst);
                Ok(call == 2)
            }
        }

        let mut st = state(0);
        st.transcoder = Arc::new(StubTranscoder);
        let t0 = Stamp::from(Utc::now() + Duration::hours(24));
        let provider = Cascading { state: st, calls: AtomicUsize::new(0) };

        let produced = next(&provider, t0, true).await;

        assert!(produced, "should have cascaded back to the third reference run");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 3);

        let expected_key = t0.six_hours_earlier().six_hours_earlier().key(0);
        assert!(provider.state().status.read().await.forecasts.contains_key(&expected_key));
    }

    #[tokio::test]
    async fn finish_artifact_failed_transcode_leaves_prior_artifact_in_place() {
        let st = state(384);
        let older = Stamp::now().six_hours_earlier();
        let old_offset = 18;
        let newer = Stamp::now();
        let new_offset = 12;
        let key = newer.key(new_offset);

        touch(&st, older, old_offset);
        std::fs::write(st.json_dir.join(older.filename(old_offset)), b"json").unwrap();
        st.status.write().await.forecasts.insert(key.clone(), vec![older.filename(old_offset)]);

        touch(&st, newer, new_offset);

        let provider = Stub(st);
        let result = finish_artifact(&provider, newer, new_offset, 12, &key).await;

        assert!(result.is_err());
        let status = provider.state().status.read().await;
        assert_eq!(status.forecasts.get(&key).unwrap(), &vec![older.filename(old_offset)]);
        assert!(provider.state().grib_dir.join(older.filename(old_offset)).exists());
        assert!(provider.state().json_dir.join(older.filename(old_offset)).exists());
    }

    #[tokio::test]
    async fn finish_artifact_supersedes_prior_entry_once_transcode_succeeds() {
        let mut st = state(384);
        st.transcoder = Arc::new(StubTranscoder);
        let older = Stamp::now().six_hours_earlier();
        let old_offset = 18;
        let newer = Stamp::now();
        let new_offset = 12;
        let key = newer.key(new_offset);

        touch(&st, older, old_offset);
        std::fs::write(st.json_dir.join(older.filename(old_offset)), b"json").unwrap();
        st.status.write().await.forecasts.insert(key.clone(), vec![older.filename(old_offset)]);

        touch(&st, newer, new_offset);

        let provider = Stub(st);
        finish_artifact(&provider, newer, new_offset, 12, &key).await.unwrap();

        let status = provider.state().status.read().await;
        assert_eq!(status.forecasts.get(&key).unwrap(), &vec![newer.filename(new_offset)]);
        assert!(!provider.state().grib_dir.join(older.filename(old_offset)).exists());
        assert!(!provider.state().json_dir.join(older.filename(old_offset)).exists());
    }

    #[tokio::test]
    async fn finish_artifact_keeps_both_entries_inside_the_supersession_grace_window() {
        let mut st = state(384);
        st.transcoder = Arc::new(StubTranscoder);
        let older = Stamp::now().six_hours_earlier();
        let old_offset = 9;
        let newer = Stamp::now();
        let new_offset = 3;
        let key = newer.key(new_offset);

        touch(&st, older, old_offset);
        std::fs::write(st.json_dir.join(older.filename(old_offset)), b"json").unwrap();
        st.status.write().await.forecasts.insert(key.clone(), vec![older.filename(old_offset)]);

        touch(&st, newer, new_offset);

        let provider = Stub(st);
        finish_artifact(&provider, newer, new_offset, 1, &key).await.unwrap();

        let status = provider.state().status.read().await;
        let entries = status.forecasts.get(&key).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries.last().unwrap(), &newer.filename(new_offset));
    }

    #[tokio::test]
    async fn clean_removes_only_entries_past_the_three_hour_cutoff() {
        let st = state(384);
        let stale_key = (Utc::now() - Duration::hours(4)).format("%Y%m%d%H").to_string();
        let fresh_key = (Utc::now() + Duration::hours(1)).format("%Y%m%d%H").to_string();

        for (key, file) in [(&stale_key, "stale.f000"), (&fresh_key, "fresh.f000")] {
            std::fs::write(st.grib_dir.join(file), b"grib").unwrap();
            std::fs::write(st.json_dir.join(file), b"json").unwrap();
            st.status.write().await.forecasts.insert(key.clone(), vec![file.to_string()]);
        }

        clean(&st).await;

        let status = st.status.read().await;
        assert!(!status.forecasts.contains_key(&stale_key));
        assert!(status.forecasts.contains_key(&fresh_key));
        assert!(!st.grib_dir.join("stale.f000").exists());
        assert!(st.grib_dir.join("fresh.f000").exists());
    }

    #[tokio::test]
    async fn next_leaves_the_index_empty_when_transcode_fails() {
        struct AlwaysFetches(ProviderState);

        #[async_trait]
        impl Provider for AlwaysFetches {
            fn state(&self) -> &ProviderState {
                &self.0
            }

            async fn fetch(&self, stamp: Stamp, offset: i64) -> Result<bool> {
                touch(&self.0, stamp, offset);
                Ok(true)
            }
        }

        let t0 = Stamp::from(Utc::now() + Duration::hours(24));
        let provider = AlwaysFetches(state(0));

        let produced = next(&provider, t0, true).await;

        assert!(!produced);
        assert!(provider.state().status.read().await.forecasts.is_empty());
    }

    #[tokio::test]
    async fn tick_completes_when_the_webhook_is_unreachable() {
        struct FetchesOnce {
            state: ProviderState,
            done: AtomicBool,
        }

        #[async_trait]
        impl Provider for FetchesOnce {
            fn state(&self) -> &ProviderState {
                &self.state
            }

            async fn fetch(&self, stamp: Stamp, offset: i64) -> Result<bool> {
                if self.done.swap(true, Ordering::SeqCst) {
                    return Ok(false);
                }
                touch(&self.state, stamp, offset);
                Ok(true)
            }
        }

        let mut st = state(384);
        st.transcoder = Arc::new(StubTranscoder);
        st.webhook = Some("http://127.0.0.1:1/notify".to_string());
        let provider = FetchesOnce { state: st, done: AtomicBool::new(false) };

        tick(&provider).await;

        assert!(!provider.state().busy.load(Ordering::SeqCst));
        assert!(provider.state().status.read().await.last_forecast_hour.is_some());
    }

    #[tokio::test]
    async fn concurrent_ticks_only_let_one_run_at_a_time() {
        struct CountingFetch {
            state: ProviderState,
            fetches: AtomicUsize,
            done: AtomicBool,
        }

        #[async_trait]
        impl Provider for CountingFetch {
            fn state(&self) -> &ProviderState {
                &self.state
            }

            async fn fetch(&self, stamp: Stamp, offset: i64) -> Result<bool> {
                if self.done.swap(true, Ordering::SeqCst) {
                    return Ok(false);
                }
                self.fetches.fetch_add(1, Ordering::SeqCst);
                touch(&self.state, stamp, offset);
                Ok(true)
            }
        }

        let mut st = state(384);
        st.transcoder = Arc::new(StubTranscoder);
        let provider = CountingFetch { state: st, fetches: AtomicUsize::new(0), done: AtomicBool::new(false) };

        tokio::join!(tick(&provider), tick(&provider));

        assert_eq!(provider.fetches.load(Ordering::SeqCst), 1);
        assert!(!provider.state().busy.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn tick_keeps_the_index_and_the_grib_json_directories_consistent() {
        struct FetchesOnce {
            state: ProviderState,
            done: AtomicBool,
        }

        #[async_trait]
        impl Provider for FetchesOnce {
            fn state(&self) -> &ProviderState {
                &self.state
            }

            async fn fetch(&self, stamp: Stamp, offset: i64) -> Result<bool> {
                if self.done.swap(true, Ordering::SeqCst) {
                    return Ok(false);
                }
                touch(&self.state, stamp, offset);
                Ok(true)
            }
        }

        let mut st = state(384);
        st.transcoder = Arc::new(StubTranscoder);
        let provider = FetchesOnce { state: st, done: AtomicBool::new(false) };

        tick(&provider).await;

        let status = provider.state().status.read().await;
        for files in status.forecasts.values() {
            for file in files {
                assert!(provider.state().grib_dir.join(file).exists());
                assert!(provider.state().json_dir.join(file).exists());
            }
        }

        for entry in std::fs::read_dir(&provider.state().grib_dir).unwrap() {
            let name = entry.unwrap().file_name().to_string_lossy().into_owned();
            if name.ends_with(".tmp") {
                continue;
            }
            let (parsed, offset) = Stamp::parse_filename(&name).unwrap();
            assert!(status.forecasts.contains_key(&parsed.key(offset)));
        }
    }
}
