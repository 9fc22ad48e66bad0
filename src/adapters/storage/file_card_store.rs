//! File-based Card Store Adapter
//!
//! Stores each card as `<base>/<card-id>.yaml`. The directory is created on
//! first save.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

use crate::domain::card::AllergyCard;
use crate::domain::foundation::{CardId, DomainError};
use crate::ports::{card_not_found, CardStore};

const CARD_EXTENSION: &str = "yaml";

#[derive(Debug, Clone)]
pub struct FileCardStore {
    base_path: PathBuf,
}

impl FileCardStore {
    /// Create a new file store rooted at `base_path`
    ///
    /// # Example
    /// ```ignore
    /// let store = FileCardStore::new("./data/cards");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn card_path(&self, id: &CardId) -> PathBuf {
        self.base_path.join(format!("{}.{}", id, CARD_EXTENSION))
    }

    async fn read_card(path: &Path) -> Result<AllergyCard, DomainError> {
        let yaml = fs::read_to_string(path).await.map_err(|e| io_error(path, e))?;
        serde_yaml::from_str(&yaml).map_err(|e| {
            DomainError::storage(format!("Failed to deserialize card: {}", e))
                .with_detail("path", path.display().to_string())
        })
    }
}

fn io_error(path: &Path, err: std::io::Error) -> DomainError {
    DomainError::storage(format!("IO error: {}", err))
        .with_detail("path", path.display().to_string())
}

#[async_trait]
impl CardStore for FileCardStore {
    async fn save(&self, card: &AllergyCard) -> Result<(), DomainError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| io_error(&self.base_path, e))?;

        let yaml = serde_yaml::to_string(card)
            .map_err(|e| DomainError::storage(format!("Failed to serialize card: {}", e)))?;

        let path = self.card_path(&card.id());
        fs::write(&path, yaml).await.map_err(|e| io_error(&path, e))?;

        debug!(card_id = %card.id(), path = %path.display(), "Card written");
        Ok(())
    }

    async fn find_by_id(&self, id: &CardId) -> Result<Option<AllergyCard>, DomainError> {
        let path = self.card_path(id);
        if !path.exists() {
            return Ok(None);
        }
        Self::read_card(&path).await.map(Some)
    }

    async fn list_recent(&self) -> Result<Vec<AllergyCard>, DomainError> {
        if !self.base_path.exists() {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&self.base_path)
            .await
            .map_err(|e| io_error(&self.base_path, e))?;

        let mut cards = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| io_error(&self.base_path, e))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(CARD_EXTENSION) {
                continue;
            }
            // An unreadable file must not hide the cards around it.
            match Self::read_card(&path).await {
                Ok(card) => cards.push(card),
                Err(err) => warn!(
                    path = %path.display(),
                    error = %err,
                    "Skipping unreadable card file"
                ),
            }
        }

        cards.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        Ok(cards)
    }

    async fn delete(&self, id: &CardId) -> Result<(), DomainError> {
        let path = self.card_path(id);
        if !path.exists() {
            return Err(card_not_found(id));
        }

        fs::remove_file(&path).await.map_err(|e| io_error(&path, e))?;

        debug!(card_id = %id, "Card file removed");
        Ok(())
    }
}
