//! Message router.
//!
//! Interprets one decoded inbound message and produces zero or more outbound
//! envelopes, one per live recipient, each translated into that recipient's
//! declared language. Per-recipient units are independent: a gateway failure
//! or timeout for one recipient skips that recipient only.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::Message;
use futures_util::stream::FuturesUnordered;
use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio::time::timeout;

use linguasync_core::error::{LinguaSyncError, Result};
use linguasync_core::protocol::{trace_id, DocEditPayload, Envelope, Inbound, Outbound};

use crate::registry::Registry;
use crate::translate::Translator;

pub struct Router {
    registry: Arc<Registry>,
    translator: Arc<dyn Translator>,
    call_timeout: Duration,
}

impl Router {
    pub fn new(
        registry: Arc<Registry>,
        translator: Arc<dyn Translator>,
        call_timeout: Duration,
    ) -> Self {
        Self {
            registry,
            translator,
            call_timeout,
        }
    }

    /// Handle one decoded inbound message from `sender`.
    pub async fn handle(&self, sender: &str, inbound: Inbound) -> Result<()> {
        tracing::debug!(participant = %sender, kind = inbound.kind(), "inbound message");
        match inbound {
            Inbound::Join { lang } => self.handle_join(sender, lang),
            Inbound::Chat { content } => self.fan_out(sender, &content, "msg").await,
            Inbound::DocEdit { content } => self.handle_doc_edit(sender, &content).await,
        }
    }

    /// Record the declared language and confirm to the sender only.
    fn handle_join(&self, sender: &str, lang: String) -> Result<()> {
        self.registry.set_language(sender, &lang);
        tracing::info!(participant = %sender, %lang, "language declared");

        let Some(me) = self.registry.get(sender) else {
            // Torn down between decode and dispatch; nothing to confirm to.
            return Ok(());
        };
        deliver(&me.tx, &Outbound::JoinConfirmed { lang })
    }

    /// The inner payload is itself JSON; a parse failure drops the whole
    /// message without touching the connection.
    async fn handle_doc_edit(&self, sender: &str, raw: &str) -> Result<()> {
        let payload = match DocEditPayload::decode(raw) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(participant = %sender, error = %e, "doc_edit dropped");
                return Ok(());
            }
        };
        tracing::debug!(participant = %sender, doc_id = %payload.doc_id, "doc edit");
        self.fan_out(sender, &payload.content, "doc").await
    }

    /// Translate-and-deliver once per live recipient.
    ///
    /// The snapshot is taken fresh for every message and includes the sender,
    /// so the sender receives its own message translated into its own
    /// language. Recipients whose outbound queue has closed are skipped even
    /// if still registered.
    async fn fan_out(&self, sender: &str, text: &str, id_prefix: &'static str) -> Result<()> {
        let source_lang = self.registry.language_of(sender);
        let recipients = self.registry.snapshot();
        tracing::debug!(
            participant = %sender,
            source_lang = %source_lang,
            recipients = recipients.len(),
            "fan-out start"
        );

        let mut units = FuturesUnordered::new();
        for (recipient_id, recipient) in recipients {
            if recipient.tx.is_closed() {
                continue;
            }
            let translator = Arc::clone(&self.translator);
            let text = text.to_string();
            let sender = sender.to_string();
            let source_lang = source_lang.clone();
            let call_timeout = self.call_timeout;

            units.push(async move {
                let target_lang = recipient.lang;
                let targets = [target_lang.clone()];
                let outcome = timeout(
                    call_timeout,
                    translator.translate(&text, &source_lang, &targets),
                )
                .await;

                let content = match outcome {
                    // Missing key means "no translation available": deliver
                    // the original text verbatim.
                    Ok(Ok(mut map)) => map.remove(&target_lang).unwrap_or(text),
                    // Hard gateway failure: skip this recipient only.
                    Ok(Err(e)) => {
                        tracing::warn!(
                            recipient = %recipient_id,
                            target_lang = %target_lang,
                            error = %e,
                            "translation failed, recipient skipped"
                        );
                        return;
                    }
                    Err(_) => {
                        tracing::warn!(
                            recipient = %recipient_id,
                            target_lang = %target_lang,
                            timeout_ms = call_timeout.as_millis() as u64,
                            "translation timed out, recipient skipped"
                        );
                        return;
                    }
                };

                let envelope = Outbound::Msg(Envelope {
                    id: trace_id(id_prefix, &recipient_id),
                    sender,
                    content,
                    source_lang,
                    target_lang,
                });
                if let Err(e) = deliver(&recipient.tx, &envelope) {
                    tracing::warn!(recipient = %recipient_id, error = %e, "envelope dropped");
                }
            });
        }

        while units.next().await.is_some() {}
        Ok(())
    }
}

/// Serialize and queue one frame on a participant's outbound channel.
/// Lossy: a closed or saturated queue drops the frame for that participant
/// only.
fn deliver(tx: &mpsc::Sender<Message>, out: &Outbound) -> Result<()> {
    let s = serde_json::to_string(out)
        .map_err(|e| LinguaSyncError::Internal(format!("json encode failed: {e}")))?;
    tx.try_send(Message::Text(s))
        .map_err(|_| LinguaSyncError::Closed)
}
