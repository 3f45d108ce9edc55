// Single-shot guarded loader shared by every screen

use std::sync::{
    Arc,
    mpsc::{self, Receiver, TryRecvError},
};

use async_trait::async_trait;
use log::{debug, warn};
use tokio::{runtime::Handle, task::JoinHandle};

use crate::F1Error;

/// Shown when a failed fetch does not carry a message of its own.
pub const UNEXPECTED_ERROR: &str = "Unexpected error";

/// Data-access collaborator of a loader: one fetch per key, returning the
/// records in source order.
#[async_trait]
pub trait Repository<K, R>: Send + Sync {
    async fn fetch(&self, key: &K) -> Result<Vec<R>, F1Error>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// State read by the renderers. Only the owning loader mutates it.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState<D> {
    pub is_loading: bool,
    pub items: Vec<D>,
    pub error_message: Option<String>,
    pub title: Option<String>,
}

impl<D> Default for ViewState<D> {
    fn default() -> Self {
        Self {
            is_loading: false,
            items: Vec::new(),
            error_message: None,
            title: None,
        }
    }
}

impl<D> ViewState<D> {
    pub fn phase(&self) -> LoadPhase {
        if self.is_loading {
            LoadPhase::Loading
        } else if self.error_message.is_some() {
            LoadPhase::Failed
        } else if !self.items.is_empty() {
            LoadPhase::Loaded
        } else {
            LoadPhase::Idle
        }
    }
}

/// `SingleShotLoader` owns the [`ViewState`] of one screen and fills it from a
/// [`Repository`] at most once.
///
/// The state moves `Idle -> Loading -> Loaded | Failed`. A load is refused
/// while one is in flight or once items are present, so repeated calls from
/// a re-rendering screen cost a single fetch.
pub struct SingleShotLoader<K, R, D> {
    state: ViewState<D>,
    repository: Arc<dyn Repository<K, R>>,
    map: fn(R) -> D,
    title: Option<fn(&K) -> String>,
}

impl<K, R, D> SingleShotLoader<K, R, D> {
    pub fn new(repository: Arc<dyn Repository<K, R>>, map: fn(R) -> D) -> Self {
        Self {
            state: ViewState::default(),
            repository,
            map,
            title: None,
        }
    }

    /// Sets the title from the key once the load succeeds.
    pub fn with_title(mut self, title: fn(&K) -> String) -> Self {
        self.title = Some(title);
        self
    }

    pub fn state(&self) -> &ViewState<D> {
        &self.state
    }

    /// Enters `Loading` unless the guard refuses. Returns whether a fetch
    /// should follow.
    pub fn begin(&mut self) -> bool {
        if self.state.is_loading || !self.state.items.is_empty() {
            return false;
        }
        self.state.is_loading = true;
        self.state.error_message = None;
        true
    }

    /// Applies the outcome of the fetch started by [`Self::begin`].
    pub fn settle(&mut self, key: &K, outcome: Result<Vec<R>, F1Error>) {
        self.state.is_loading = false;
        match outcome {
            Ok(records) => {
                self.state.items = records.into_iter().map(self.map).collect();
                if let Some(title) = self.title {
                    self.state.title = Some(title(key));
                }
                debug!("Loaded {} items", self.state.items.len());
            }
            Err(e) => {
                warn!("Load failed: {}", e);
                self.state.error_message = Some(
                    e.user_message()
                        .unwrap_or_else(|| UNEXPECTED_ERROR.to_string()),
                );
            }
        }
    }

    /// Runs the whole load in place: guard, one fetch, settle.
    pub async fn load(&mut self, key: K) {
        if !self.begin() {
            debug!("Load skipped, state already loading or loaded");
            return;
        }
        let outcome = self.repository.fetch(&key).await;
        self.settle(&key, outcome);
    }

    fn repository(&self) -> Arc<dyn Repository<K, R>> {
        Arc::clone(&self.repository)
    }
}

struct PendingFetch<K, R> {
    key: K,
    receiver: Receiver<Result<Vec<R>, F1Error>>,
    task: JoinHandle<()>,
}

/// Binds a [`SingleShotLoader`] to the lifetime of a screen.
///
/// The fetch runs on the tokio runtime and its outcome is handed back over a
/// channel, so the state is only ever touched from the thread that renders
/// it. Dropping the screen loader aborts a fetch still in flight.
pub struct ScreenLoader<K, R, D> {
    loader: SingleShotLoader<K, R, D>,
    pending: Option<PendingFetch<K, R>>,
}

impl<K, R, D> ScreenLoader<K, R, D>
where
    K: Clone + Send + Sync + 'static,
    R: Send + 'static,
{
    pub fn new(loader: SingleShotLoader<K, R, D>) -> Self {
        Self {
            loader,
            pending: None,
        }
    }

    pub fn state(&self) -> &ViewState<D> {
        self.loader.state()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts a background fetch for `key`. `notify` runs once the outcome is
    /// ready to be picked up by [`Self::poll`].
    pub fn request(
        &mut self,
        key: K,
        runtime: &Handle,
        notify: impl Fn() + Send + 'static,
    ) -> bool {
        if !self.loader.begin() {
            debug!("Request skipped, state already loading or loaded");
            return false;
        }

        let (sender, receiver) = mpsc::channel();
        let repository = self.loader.repository();
        let task_key = key.clone();
        let task = runtime.spawn(async move {
            let outcome = repository.fetch(&task_key).await;
            if sender.send(outcome).is_err() {
                debug!("Screen closed before the fetch completed");
            }
            notify();
        });

        self.pending = Some(PendingFetch {
            key,
            receiver,
            task,
        });
        true
    }

    /// Settles the state if the fetch has reported. Returns whether the state
    /// changed.
    pub fn poll(&mut self) -> bool {
        let Some(pending) = self.pending.as_ref() else {
            return false;
        };
        let outcome = match pending.receiver.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => {
                warn!("Fetch task ended without a result");
                Err(F1Error::FetchTaskFailed)
            }
        };
        if let Some(pending) = self.pending.take() {
            self.loader.settle(&pending.key, outcome);
        }
        true
    }
}

impl<K, R, D> Drop for ScreenLoader<K, R, D> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!("Aborting fetch of a closed screen");
            pending.task.abort();
        }
    }
}
