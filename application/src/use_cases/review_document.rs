//! Review Document use case
//!
//! Runs the batch review loop over one opened document:
//! segment → batch → (retrieve context → ask the model → decode → annotate)
//! for each batch in order.

use crate::config::ReviewParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::document::{DocumentError, ReviewDocument};
use crate::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use crate::ports::progress::{NoProgress, ReviewProgressNotifier};
use crate::ports::rate_limiter::{RateLimiter, Unlimited};
use crate::ports::retriever::{RetrievalError, Retriever};
use crate::use_cases::shared::{call_with_retry, is_cancelled};
use corporate_agent_domain::{
    Batch, DocumentReview, DocumentUnit, Finding, PromptTemplate, decode_issues, format_clauses,
};
use corporate_agent_domain::{batches, segment};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that abort the review of a document
#[derive(Error, Debug)]
pub enum ReviewDocumentError {
    #[error("Model call failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Context retrieval failed: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("Annotation failed: {0}")]
    Annotation(#[from] DocumentError),

    #[error("Review cancelled")]
    Cancelled,
}

/// Use case for reviewing one document batch by batch
pub struct ReviewDocumentUseCase<G: LlmGateway + 'static, R: Retriever + 'static> {
    gateway: Arc<G>,
    retriever: Arc<R>,
    params: ReviewParams,
    rate_limiter: Arc<dyn RateLimiter>,
    conversation_logger: Arc<dyn ConversationLogger>,
    cancellation_token: Option<CancellationToken>,
}

impl<G: LlmGateway + 'static, R: Retriever + 'static> Clone for ReviewDocumentUseCase<G, R> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            retriever: self.retriever.clone(),
            params: self.params.clone(),
            rate_limiter: self.rate_limiter.clone(),
            conversation_logger: self.conversation_logger.clone(),
            cancellation_token: self.cancellation_token.clone(),
        }
    }
}

impl<G: LlmGateway + 'static, R: Retriever + 'static> ReviewDocumentUseCase<G, R> {
    pub fn new(gateway: Arc<G>, retriever: Arc<R>, params: ReviewParams) -> Self {
        Self {
            gateway,
            retriever,
            params,
            rate_limiter: Arc::new(Unlimited),
            conversation_logger: Arc::new(NoConversationLogger),
            cancellation_token: None,
        }
    }

    /// Pace model calls with the given limiter
    pub fn with_rate_limiter(mut self, limiter: Arc<dyn RateLimiter>) -> Self {
        self.rate_limiter = limiter;
        self
    }

    /// Record prompts and responses to a transcript
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Set a cancellation token, checked between batches
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn params(&self) -> &ReviewParams {
        &self.params
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        name: &str,
        document: &mut dyn ReviewDocument,
    ) -> Result<DocumentReview, ReviewDocumentError> {
        self.execute_with_progress(name, document, &NoProgress).await
    }

    /// Review every unit of `document`, annotating it in place.
    ///
    /// Malformed responses and invalid elements are recovered from and
    /// counted in the returned stats. Retrieval or model failures that
    /// survive the retry policy abort the document.
    pub async fn execute_with_progress(
        &self,
        name: &str,
        document: &mut dyn ReviewDocument,
        progress: &dyn ReviewProgressNotifier,
    ) -> Result<DocumentReview, ReviewDocumentError> {
        let units = segment(document.paragraphs(), self.params.min_paragraph_chars);
        let batches = batches(&units, self.params.batch_size);
        let mut review = DocumentReview::new(name);

        info!(
            document = name,
            units = units.len(),
            batches = batches.len(),
            "Starting review"
        );
        progress.on_document_start(name, batches.len());

        if units.is_empty() {
            progress.on_document_complete(name, 0);
            return Ok(review);
        }

        let session = self
            .gateway
            .create_session_with_system_prompt(&self.params.model, PromptTemplate::review_system())
            .await?;

        let pass = DocumentPass {
            name,
            units: &units,
            session: session.as_ref(),
            progress,
        };

        for batch in &batches {
            if is_cancelled(&self.cancellation_token) {
                info!(document = name, batch = batch.number, "Review cancelled");
                return Err(ReviewDocumentError::Cancelled);
            }

            let found = self
                .review_batch(&pass, batch, document, &mut review)
                .await?;

            review.stats.batches_reviewed += 1;
            progress.on_batch_complete(name, batch.number, found);
        }

        info!(
            document = name,
            issues = review.findings.len(),
            malformed = review.stats.malformed_responses,
            discarded = review.stats.discarded_issues,
            "Review complete"
        );
        progress.on_document_complete(name, review.findings.len());

        Ok(review)
    }

    /// Review one batch and return how many issues it produced
    async fn review_batch(
        &self,
        pass: &DocumentPass<'_>,
        batch: &Batch<'_>,
        document: &mut dyn ReviewDocument,
        review: &mut DocumentReview,
    ) -> Result<usize, ReviewDocumentError> {
        let DocumentPass {
            name,
            units,
            session,
            progress,
        } = *pass;
        let clauses = format_clauses(batch.units);

        let retriever = self.retriever.as_ref();
        let query = clauses.as_str();
        let passages = call_with_retry(
            &self.params.retry,
            self.params.call_timeout,
            None,
            |attempt, e: &RetrievalError| {
                warn!(document = name, batch = batch.number, attempt, "Retrieval failed, retrying: {}", e);
                progress.on_retry(name, attempt, &e.to_string());
            },
            move || retriever.retrieve(query),
        )
        .await?;
        debug!(
            document = name,
            batch = batch.number,
            passages = passages.len(),
            "Retrieved context"
        );

        let context = passages.join("\n");
        let prompt = PromptTemplate::review_prompt(&context, &clauses);

        self.conversation_logger.log(ConversationEvent::new(
            "review_prompt",
            serde_json::json!({
                "document": name,
                "batch": batch.number,
                "clauses": batch.clause_numbers().collect::<Vec<_>>(),
                "prompt": prompt,
            }),
        ));

        let prompt_ref = prompt.as_str();
        let response = call_with_retry(
            &self.params.retry,
            self.params.call_timeout,
            Some(self.rate_limiter.as_ref()),
            |attempt, e: &GatewayError| {
                warn!(document = name, batch = batch.number, attempt, "Model call failed, retrying: {}", e);
                progress.on_retry(name, attempt, &e.to_string());
            },
            move || session.send(prompt_ref),
        )
        .await?;

        self.conversation_logger.log(ConversationEvent::new(
            "review_response",
            serde_json::json!({
                "document": name,
                "batch": batch.number,
                "model": session.model().to_string(),
                "response": response,
            }),
        ));

        let decoded = match decode_issues(&response, units.len()) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!(
                    document = name,
                    batch = batch.number,
                    "Discarding malformed model response: {}",
                    e
                );
                self.conversation_logger.log(ConversationEvent::new(
                    "malformed_response",
                    serde_json::json!({
                        "document": name,
                        "batch": batch.number,
                        "error": e.to_string(),
                        "response": response,
                    }),
                ));
                review.stats.malformed_responses += 1;
                return Ok(0);
            }
        };

        for discarded in &decoded.discarded {
            warn!(
                document = name,
                batch = batch.number,
                position = discarded.position,
                "Dropping issue: {}",
                discarded.reason
            );
            self.conversation_logger.log(ConversationEvent::new(
                "issue_discarded",
                serde_json::json!({
                    "document": name,
                    "batch": batch.number,
                    "position": discarded.position,
                    "reason": discarded.reason.to_string(),
                }),
            ));
        }
        review.stats.discarded_issues += decoded.discarded.len();

        let found = decoded.issues.len();
        for issue in decoded.issues {
            // clause numbers are range-checked against `units` by the decoder
            let Some(unit) = units.get(issue.clause_number - 1) else {
                continue;
            };
            document.annotate(
                unit.paragraph,
                &issue.comment_text(),
                &self.params.annotation_author,
            )?;
            review.findings.push(Finding {
                section: unit.section_excerpt(),
                issue,
            });
        }

        Ok(found)
    }
}

/// State shared by every batch of one document
struct DocumentPass<'a> {
    name: &'a str,
    units: &'a [DocumentUnit],
    session: &'a dyn LlmSession,
    progress: &'a dyn ReviewProgressNotifier,
}
