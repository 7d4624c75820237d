//! Submit handling for the query form

use tracing::{debug, error};

use crate::core::page::{Page, Region, TrustedMarkup};
use crate::core::payload::QueryEnvelope;
use crate::core::query_client::{QueryTransport, RequestFailure};

pub const LOADING_PLACEHOLDER: &str = "Loading...";

/// A form submission carrying the current value of the query input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitEvent {
    query: String,
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            default_prevented: false,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Whether dispatching a request marks the form busy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingGuard {
    /// The busy flag is never raised, so overlapping submissions each send a request.
    #[default]
    Inert,
    /// The busy flag is raised on dispatch and blocks submissions until completion.
    Enforced,
}

/// A request the controller has committed to sending.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a dispatch must be sent and completed"]
pub struct Dispatch {
    query: String,
}

impl Dispatch {
    pub fn query(&self) -> &str {
        &self.query
    }
}

pub struct QueryFormController<P, T> {
    page: P,
    transport: T,
    guard: LoadingGuard,
    loading: bool,
}

impl<P: Page, T: QueryTransport> QueryFormController<P, T> {
    pub fn new(page: P, transport: T) -> Self {
        Self::with_guard(page, transport, LoadingGuard::default())
    }

    pub fn with_guard(page: P, transport: T, guard: LoadingGuard) -> Self {
        Self {
            page,
            transport,
            guard,
            loading: false,
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn guard(&self) -> LoadingGuard {
        self.guard
    }

    /// Handle a form submission up to the point where the request goes out.
    ///
    /// Returns `None` when the form is busy; the page is left untouched then.
    pub fn on_submit(&mut self, event: &mut SubmitEvent) -> Option<Dispatch> {
        event.prevent_default();

        if self.loading {
            debug!(query = event.query(), "submission ignored while a query is running");
            return None;
        }

        if self.guard == LoadingGuard::Enforced {
            self.loading = true;
        }

        self.page.hide(Region::Search);
        self.page.show(Region::Loader);
        self.page.set_text(Region::Answer, LOADING_PLACEHOLDER);

        Some(Dispatch {
            query: event.query().to_string(),
        })
    }

    /// Apply the outcome of a dispatched request to the page.
    pub fn complete(&mut self, outcome: Result<QueryEnvelope, RequestFailure>) {
        match outcome {
            Ok(envelope) => self.render_answer(envelope),
            Err(failure) => self.render_failure(failure),
        }
    }

    /// Send a dispatch through the transport and apply the outcome.
    pub async fn send(&mut self, dispatch: Dispatch) {
        let outcome = self.transport.post_query(dispatch.query()).await;
        self.complete(outcome);
    }

    /// Full submit cycle: guard, loading state, request, rendering.
    pub async fn submit(&mut self, event: &mut SubmitEvent) {
        if let Some(dispatch) = self.on_submit(event) {
            self.send(dispatch).await;
        }
    }

    fn render_answer(&mut self, envelope: QueryEnvelope) {
        let data = envelope.data;

        self.page.set_text(Region::Answer, &data.plain);
        self.page.set_text(Region::QueryEcho, &data.query);
        self.page.set_text(Region::Params, &data.params_text());
        self.page.set_markup(Region::Tree, &TrustedMarkup::trust(data.tree));
        self.page.set_markup(Region::Sparql, &TrustedMarkup::trust(data.sparql_query));

        self.finish_loading();
    }

    fn render_failure(&mut self, failure: RequestFailure) {
        self.finish_loading();
        error!(status = ?failure.status(), "query request failed: {failure}");
        self.page.set_text(Region::Answer, failure.response_text());
    }

    fn finish_loading(&mut self) {
        self.loading = false;
        self.page.show(Region::Search);
        self.page.hide(Region::Loader);
    }
}
