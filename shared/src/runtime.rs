//! Drives [`App`] against a live gateway.
//!
//! Events are applied one at a time by whoever owns the `Runtime`. Each
//! fetch runs on its own task and its completion is fed back in as an
//! ordinary event, in completion order. Nothing is cancelled: a late
//! response is either applied or dropped by the app's routing.

use tokio::sync::{mpsc, watch};
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, warn};

use crate::api::ApiClient;
use crate::app::{App, Model};
use crate::capabilities::Effect;
use crate::event::Event;
use crate::view::ViewModel;

pub struct Runtime {
    app: App,
    model: Model,
    api: ApiClient,
    tasks: JoinSet<Event>,
    view: watch::Sender<ViewModel>,
}

impl Runtime {
    pub fn new(api: ApiClient) -> Self {
        Self::with_model(api, Model::default())
    }

    /// Resumes from a previously saved model.
    pub fn with_model(api: ApiClient, model: Model) -> Self {
        let app = App;
        let (view, _) = watch::channel(app.view(&model));
        Self {
            app,
            model,
            api,
            tasks: JoinSet::new(),
            view,
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Latest view model. Updated on every render.
    pub fn subscribe(&self) -> watch::Receiver<ViewModel> {
        self.view.subscribe()
    }

    pub fn pending_fetches(&self) -> usize {
        self.tasks.len()
    }

    /// Applies one event and starts any fetches it asks for.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, event: Event) {
        let effects = self.app.update(event, &mut self.model);
        for effect in effects {
            match effect {
                Effect::Render => {
                    self.view.send_replace(self.app.view(&self.model));
                }
                Effect::Fetch(fetch) => {
                    debug!(route = %fetch.route(), "starting fetch");
                    let api = self.api.clone();
                    self.tasks.spawn(async move { fetch.perform(&api).await });
                }
            }
        }
    }

    /// Waits for the next fetch to finish and applies its completion.
    ///
    /// Returns `false` when nothing is pending.
    pub async fn step(&mut self) -> bool {
        match self.tasks.join_next().await {
            Some(joined) => {
                self.complete(joined);
                true
            }
            None => false,
        }
    }

    /// Applies completions until no fetch is pending, including any
    /// fetches the completions themselves start.
    pub async fn settle(&mut self) {
        while self.step().await {}
    }

    /// Event loop for a shell: applies incoming events and fetch
    /// completions as they arrive. When `events` closes, pending fetches
    /// are settled and the final model returned.
    pub async fn run(mut self, mut events: mpsc::Receiver<Event>) -> Model {
        loop {
            tokio::select! {
                received = events.recv() => match received {
                    Some(event) if event.is_fetch_response() => {
                        warn!(event = event.name(), "completion events come from fetches; ignoring");
                    }
                    Some(event) => self.dispatch(event),
                    None => break,
                },
                Some(joined) = self.tasks.join_next(), if !self.tasks.is_empty() => {
                    self.complete(joined);
                }
            }
        }

        self.settle().await;
        self.model
    }

    fn complete(&mut self, joined: Result<Event, JoinError>) {
        match joined {
            Ok(event) => self.dispatch(event),
            Err(e) => error!(error = %e, "fetch task did not complete"),
        }
    }
}
