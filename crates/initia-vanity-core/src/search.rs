//! Vanity search engine

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use initia_vanity_keys::{DeriveError, DerivedKey, Deriver, DeriverKind, HdPath};
use initia_vanity_pattern::{calculate_difficulty, Pattern, PatternMatcher, Position};

use crate::error::SearchError;
use crate::stats::{ProgressReport, SearchStats, StatsSnapshot};
use crate::store::{Insertion, ResultStore};

/// A collected match
pub type VanityResult = DerivedKey;

/// Search configuration, fixed for the lifetime of one generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Substring to look for
    pub pattern: String,
    /// Where the substring has to appear
    pub position: Position,
    /// Compare without lowercasing
    pub case_sensitive: bool,
    /// Number of distinct matches to collect
    pub target_count: usize,
    /// Derive keys from BIP-39 mnemonics instead of raw random keys
    pub mnemonic_mode: bool,
    /// Phrase to derive from in mnemonic mode (fresh per attempt if absent)
    pub supplied_mnemonic: Option<String>,
    /// HD account, `m/44'/118'/{account}'/0/..`
    pub account: u32,
    /// HD address index, `m/44'/118'/..'/0/{address_index}`
    pub address_index: u32,
    /// Progress sampling period
    pub progress_interval: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            position: Position::End,
            case_sensitive: false,
            target_count: 1,
            mnemonic_mode: false,
            supplied_mnemonic: None,
            account: 0,
            address_index: 0,
            progress_interval: Duration::from_millis(100),
        }
    }
}

impl SearchConfig {
    pub fn new(pattern: impl Into<String>, position: Position) -> Self {
        Self {
            pattern: pattern.into(),
            position,
            ..Default::default()
        }
    }

    pub fn pattern(&self) -> Pattern {
        Pattern::new(self.pattern.clone(), self.position, self.case_sensitive)
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        self.pattern().validate()?;
        if self.target_count < 1 {
            return Err(SearchError::InvalidTargetCount);
        }
        Ok(())
    }

    /// Strategy selected by this configuration
    pub fn deriver_kind(&self) -> DeriverKind {
        if self.mnemonic_mode {
            DeriverKind::Mnemonic {
                phrase: self.supplied_mnemonic.clone(),
                path: HdPath::new(self.account, self.address_index),
            }
        } else {
            DeriverKind::Random
        }
    }
}

/// Lifecycle of a generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum EngineState {
    Idle = 0,
    Running = 1,
    Stopping = 2,
    Stopped = 3,
}

impl EngineState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => EngineState::Idle,
            1 => EngineState::Running,
            2 => EngineState::Stopping,
            _ => EngineState::Stopped,
        }
    }
}

/// Vanity address generator
///
/// One instance runs one search. Share it behind an `Arc` to call [`stop`],
/// [`results`] or [`stats`] from other threads while [`generate`] blocks.
///
/// [`stop`]: VanityGenerator::stop
/// [`results`]: VanityGenerator::results
/// [`stats`]: VanityGenerator::stats
/// [`generate`]: VanityGenerator::generate
pub struct VanityGenerator {
    config: SearchConfig,
    matcher: PatternMatcher,
    difficulty: f64,
    stats: SearchStats,
    results: ResultStore,
    stop_requested: AtomicBool,
    state: AtomicU8,
}

impl VanityGenerator {
    /// Create a new generator; rejects an empty pattern or a zero count
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;

        let pattern = config.pattern();
        let difficulty = calculate_difficulty(&pattern);

        Ok(Self {
            matcher: PatternMatcher::new(pattern),
            difficulty,
            stats: SearchStats::new(),
            results: ResultStore::new(config.target_count),
            stop_requested: AtomicBool::new(false),
            state: AtomicU8::new(EngineState::Idle as u8),
            config,
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Expected attempts per match
    pub fn difficulty(&self) -> f64 {
        self.difficulty
    }

    pub fn state(&self) -> EngineState {
        EngineState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Snapshot of collected results in discovery order
    pub fn results(&self) -> Vec<VanityResult> {
        self.results.snapshot()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Request cooperative shutdown. Idempotent and callable from any thread.
    pub fn stop(&self) {
        if self.stop_requested.swap(true, Ordering::AcqRel) {
            return;
        }
        debug!("stop signal fired");
        let _ = self.state.compare_exchange(
            EngineState::Running as u8,
            EngineState::Stopping as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }

    /// Run the search, blocking until the target count is reached or
    /// [`stop`](Self::stop) is called
    pub fn generate(&self, threads: usize) -> Result<(), SearchError> {
        self.generate_with_progress(threads, |_| {})
    }

    /// Like [`generate`](Self::generate), delivering progress samples to
    /// `on_progress` on a separate thread.
    ///
    /// A sample is dropped rather than queued while the previous one is
    /// still undelivered, so a slow callback never holds up the workers.
    pub fn generate_with_progress<F>(&self, threads: usize, on_progress: F) -> Result<(), SearchError>
    where
        F: FnMut(&ProgressReport) + Send,
    {
        self.generate_using(threads, || self.config.deriver_kind().build(), on_progress)
    }

    /// Drive a search with a deriver supplied by `make_deriver`
    pub(crate) fn generate_using<D, F>(
        &self,
        threads: usize,
        make_deriver: D,
        on_progress: F,
    ) -> Result<(), SearchError>
    where
        D: FnOnce() -> Result<Box<dyn Deriver>, DeriveError>,
        F: FnMut(&ProgressReport) + Send,
    {
        if threads < 1 {
            return Err(SearchError::InvalidThreadCount);
        }
        self.begin()?;

        let outcome = make_deriver()
            .map_err(SearchError::from)
            .and_then(|deriver| self.run(threads, deriver.as_ref(), on_progress));

        self.stop();
        self.state.store(EngineState::Stopped as u8, Ordering::Release);

        let stats = self.stats.snapshot();
        match &outcome {
            Ok(()) => info!(
                attempts = stats.attempts,
                found = stats.found,
                elapsed_ms = self.stats.elapsed().as_millis() as u64,
                "vanity search finished"
            ),
            Err(e) => info!(error = %e, attempts = stats.attempts, "vanity search aborted"),
        }

        outcome
    }

    fn begin(&self) -> Result<(), SearchError> {
        self.state
            .compare_exchange(
                EngineState::Idle as u8,
                EngineState::Running as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .map_err(|_| SearchError::AlreadyStarted)?;

        // stop() may have raced ahead of the transition to Running
        if self.is_stop_requested() {
            self.state.store(EngineState::Stopping as u8, Ordering::Release);
        }
        Ok(())
    }

    fn run<F>(&self, threads: usize, deriver: &dyn Deriver, mut on_progress: F) -> Result<(), SearchError>
    where
        F: FnMut(&ProgressReport) + Send,
    {
        if self.is_stop_requested() {
            info!("stop requested before start, skipping search");
            return Ok(());
        }

        info!(
            pattern = %self.config.pattern,
            position = %self.config.position,
            case_sensitive = self.config.case_sensitive,
            count = self.config.target_count,
            threads,
            deriver = deriver.name(),
            difficulty = self.difficulty,
            "starting vanity search"
        );
        self.stats.start();

        if deriver.is_deterministic() {
            // A supplied mnemonic has exactly one candidate account
            info!("deriver is deterministic, evaluating its single candidate");
            return self.attempt(deriver).map_err(SearchError::from);
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("vanity-worker-{}", i))
            .build()?;

        let (report_tx, report_rx) = bounded::<ProgressReport>(1);
        let (done_tx, done_rx) = bounded::<()>(0);

        thread::scope(|scope| {
            scope.spawn(move || self.sample_progress(report_tx, done_rx));
            scope.spawn(move || {
                for report in report_rx {
                    on_progress(&report);
                }
            });

            let outcome = pool.install(|| {
                (0..threads)
                    .into_par_iter()
                    .try_for_each(|worker| self.worker_loop(worker, deriver))
            });

            self.stop();
            // Disconnecting wakes the sampler immediately
            drop(done_tx);
            outcome
        })
    }

    fn sample_progress(&self, report_tx: Sender<ProgressReport>, done_rx: Receiver<()>) {
        loop {
            match done_rx.recv_timeout(self.config.progress_interval) {
                Err(RecvTimeoutError::Timeout) => {
                    match report_tx.try_send(self.stats.report(self.config.target_count)) {
                        Ok(()) | Err(TrySendError::Full(_)) => {}
                        Err(TrySendError::Disconnected(_)) => break,
                    }
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    }

    fn worker_loop(&self, worker: usize, deriver: &dyn Deriver) -> Result<(), SearchError> {
        let mut discarded = 0u64;

        loop {
            if self.is_stop_requested() {
                break;
            }
            if self.results.is_full() {
                self.stop();
                break;
            }

            match self.attempt(deriver) {
                Ok(()) => {}
                Err(e) if e.is_fatal() => {
                    self.stop();
                    return Err(e.into());
                }
                Err(e) => {
                    discarded += 1;
                    trace!(worker, error = %e, "discarding attempt");
                }
            }
        }

        debug!(worker, discarded, "worker exiting");
        Ok(())
    }

    /// One derive/match/record cycle; counts the attempt only if derivation succeeded
    fn attempt(&self, deriver: &dyn Deriver) -> Result<(), DeriveError> {
        let candidate = deriver.derive()?;

        if self.matcher.matches(&candidate.address) {
            let address = candidate.address.clone();
            match self.results.try_insert(candidate, || self.stats.record_found()) {
                Insertion::Added { filled } => {
                    debug!(%address, "match recorded");
                    if filled {
                        self.stop();
                    }
                }
                Insertion::Full | Insertion::Duplicate => {
                    trace!(%address, "match discarded");
                }
            }
        }

        self.stats.record_attempt();
        Ok(())
    }
}
