//! # Label Resolver
//!
//! Resolves label names to ids (creating missing labels on the way) and
//! links labels to boards as a best-effort batch: each link attempt is
//! independent, and a duplicate-link conflict never aborts the others.
//! Board creation must not fail solely because a label was already linked.

use std::sync::Arc;

use uuid::Uuid;

use mb_core::{AppError, Label, LabelStore, Result};

/// Outcome of one link attempt inside a batch.
#[derive(Debug)]
pub struct LinkOutcome {
    pub label_id: Uuid,
    pub result: Result<()>,
}

impl LinkOutcome {
    pub fn is_linked(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Clone)]
pub struct LabelResolver {
    labels: Arc<dyn LabelStore>,
}

impl LabelResolver {
    pub fn new(labels: Arc<dyn LabelStore>) -> Self {
        Self { labels }
    }

    /// Resolves each name to a label id, creating labels that do not exist
    /// yet. Ids come back in input order; duplicate names in the input
    /// produce duplicate ids, not a deduplicated set.
    ///
    /// The exists-then-create window can race with a concurrent insert; the
    /// name uniqueness constraint catches that as a `Conflict`.
    pub async fn resolve_or_create(&self, names: &[String]) -> Result<Vec<Uuid>> {
        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            let id = match self.labels.find_label_by_name(name).await? {
                Some(existing) => existing.id,
                None => {
                    let label = Label::new(name.clone())?;
                    let id = label.id;
                    self.labels.create_label(&label).await?;
                    id
                }
            };
            ids.push(id);
        }
        Ok(ids)
    }

    /// Links every label to the board concurrently and waits for all
    /// attempts to settle. Never raises for partial failure; the caller gets
    /// one outcome per label id.
    pub async fn link_all(&self, board_id: Uuid, label_ids: &[Uuid]) -> Vec<LinkOutcome> {
        let attempts = label_ids.iter().map(|label_id| {
            let label_id = *label_id;
            async move {
                let result = self.labels.create_link(board_id, label_id).await;
                if let Err(err) = &result {
                    tracing::debug!(%board_id, %label_id, %err, "label link attempt failed");
                }
                LinkOutcome { label_id, result }
            }
        });
        futures_util::future::join_all(attempts).await
    }

    /// Deletes a label, removing **all** of its board links first so no
    /// dangling link can survive the label.
    pub async fn delete_label(&self, label_id: Uuid) -> Result<()> {
        let removed = self.labels.delete_links_for_label(label_id).await?;
        tracing::debug!(%label_id, removed, "unlinked label from boards");
        if self.labels.delete_label(label_id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound("label".to_string(), label_id.to_string()))
        }
    }
}
