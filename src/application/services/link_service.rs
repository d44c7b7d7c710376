//! Link creation, lookup and redirect service.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, error, info, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::click_worker::record_click;
use crate::domain::entities::{Link, NewLink};
use crate::domain::error::{ShortenError, StoreError};
use crate::domain::repositories::LinkRepository;
use crate::utils::code_generator::{CodeGenerator, RandomCodeGenerator, is_valid_code};
use crate::utils::url_validator::validate_url;

/// Default number of codes tried before giving up on a create.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Service for creating and resolving shortened links.
///
/// Holds no per-request state: every call is a short transaction over the
/// injected repository. Click counting is handed to the background worker
/// through `click_sender` and never delays a redirect.
pub struct LinkService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    code_generator: Arc<dyn CodeGenerator>,
    click_sender: mpsc::Sender<ClickEvent>,
    max_attempts: usize,
}

impl<L: LinkRepository + ?Sized + 'static> LinkService<L> {
    /// Creates a new link service using [`RandomCodeGenerator`].
    pub fn new(link_repository: Arc<L>, click_sender: mpsc::Sender<ClickEvent>) -> Self {
        Self {
            link_repository,
            code_generator: Arc::new(RandomCodeGenerator),
            click_sender,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Replaces the code generator.
    pub fn with_code_generator(mut self, code_generator: Arc<dyn CodeGenerator>) -> Self {
        self.code_generator = code_generator;
        self
    }

    /// Sets how many codes are tried before [`ShortenError::CodeSpaceExhausted`].
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Returns the short code for `original_url`, creating a link if needed.
    ///
    /// # Deduplication
    ///
    /// If the URL has been shortened before, the existing code is returned and
    /// nothing is written. A concurrent create that wins the race for the same
    /// URL is detected through [`StoreError::DuplicateOriginal`], and the
    /// winner's code is returned.
    ///
    /// # Code Generation
    ///
    /// Codes colliding with an existing link ([`StoreError::DuplicateCode`])
    /// are regenerated, up to the configured attempt bound.
    ///
    /// # Errors
    ///
    /// - [`ShortenError::InvalidUrl`] if the URL is not absolute with a host
    /// - [`ShortenError::CodeSpaceExhausted`] if every attempt collided
    /// - [`ShortenError::RandomSource`] if the code generator fails
    /// - [`ShortenError::Store`] on other store failures
    pub async fn create_short_url(&self, original_url: &str) -> Result<String, ShortenError> {
        validate_url(original_url).map_err(|e| ShortenError::InvalidUrl(e.to_string()))?;

        if let Some(existing) = self.link_repository.find_by_original(original_url).await? {
            debug!("URL already shortened as {}", existing.short);
            return Ok(existing.short);
        }

        for attempt in 1..=self.max_attempts {
            let code = self
                .code_generator
                .generate()
                .map_err(|e| ShortenError::RandomSource(e.to_string()))?;

            match self
                .link_repository
                .create(NewLink::new(code, original_url))
                .await
            {
                Ok(link) => {
                    info!(code = %link.short, "Short link created");
                    metrics::counter!("urlcutter_links_created_total").increment(1);
                    return Ok(link.short);
                }
                Err(StoreError::DuplicateCode) => {
                    warn!(attempt, "Short code collision, regenerating");
                    metrics::counter!("urlcutter_code_collisions_total").increment(1);
                }
                Err(StoreError::DuplicateOriginal) => {
                    debug!("Concurrent create won the race for this URL");
                    return self
                        .link_repository
                        .find_by_original(original_url)
                        .await?
                        .map(|winner| winner.short)
                        .ok_or(ShortenError::Store(StoreError::DuplicateOriginal));
                }
                Err(e) => return Err(e.into()),
            }
        }

        error!(
            attempts = self.max_attempts,
            "Every generated short code collided; code space may be exhausted"
        );
        Err(ShortenError::CodeSpaceExhausted {
            attempts: self.max_attempts,
        })
    }

    /// Resolves a short code to its original URL without counting a click.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenError::NotFound`] if no link matches the code.
    /// Returns [`ShortenError::Store`] on store failures.
    pub async fn get_original_url(&self, code: &str) -> Result<String, ShortenError> {
        self.get_link(code).await.map(|link| link.original)
    }

    /// Retrieves the full link record, including its click counter.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_original_url`].
    pub async fn get_link(&self, code: &str) -> Result<Link, ShortenError> {
        if !is_valid_code(code) {
            return Err(ShortenError::NotFound(code.to_string()));
        }

        self.link_repository
            .find_by_short(code)
            .await?
            .ok_or_else(|| ShortenError::NotFound(code.to_string()))
    }

    /// Resolves a short code for a visitor and counts the click.
    ///
    /// The click is dispatched after the lookup succeeds and is not awaited;
    /// a failing increment is logged and never changes the result.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_original_url`].
    pub async fn redirect(&self, code: &str) -> Result<String, ShortenError> {
        let original = self.get_original_url(code).await?;
        self.dispatch_click(code);
        Ok(original)
    }

    /// Checks that the store is reachable.
    pub async fn check_store(&self) -> Result<(), StoreError> {
        self.link_repository.ping().await
    }

    /// Returns true while the click worker is receiving events.
    pub fn click_queue_open(&self) -> bool {
        !self.click_sender.is_closed()
    }

    /// Remaining free slots in the click queue.
    pub fn click_queue_capacity(&self) -> usize {
        self.click_sender.capacity()
    }

    /// Hands a click to the worker, or to a detached task if the queue is full.
    fn dispatch_click(&self, code: &str) {
        match self.click_sender.try_send(ClickEvent::new(code)) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                debug!("Click queue full, recording {} directly", event.code);
                let repository = self.link_repository.clone();
                tokio::spawn(async move {
                    record_click(repository.as_ref(), &event.code).await;
                });
            }
            Err(TrySendError::Closed(event)) => {
                warn!("Click queue closed, dropping click for {}", event.code);
                metrics::counter!("urlcutter_clicks_dropped_total").increment(1);
            }
        }
    }
}
