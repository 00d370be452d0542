/* Plain id-keyed repositories for the shop's side records: contacts and
 * attachments. Each store is owned by the caller and passed by reference.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    constants::messages::{
        EMPTY_NAME_MESSAGE, UNKNOWN_ATTACHMENT_MESSAGE, UNKNOWN_CONTACT_MESSAGE,
    },
    utils::{LedgerError, LedgerResult},
};

// A record kept in a `RecordStore`.
pub trait Record {
    // Message returned when an id is not in the store.
    const UNKNOWN_MESSAGE: &'static str;

    fn id(&self) -> Uuid;
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordStore<T> {
    records: Vec<T>,
}

impl<T> Default for RecordStore<T> {
    fn default() -> Self {
        RecordStore {
            records: Vec::new(),
        }
    }
}

impl<T: Record> RecordStore<T> {
    pub fn new() -> RecordStore<T> {
        RecordStore::default()
    }

    fn position(&self, id: Uuid) -> LedgerResult<usize> {
        self.records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| LedgerError::UserError(T::UNKNOWN_MESSAGE.to_string()))
    }

    pub fn insert(&mut self, record: T) -> Uuid {
        let id = record.id();
        self.records.push(record);
        id
    }

    pub fn get(&self, id: Uuid) -> LedgerResult<&T> {
        let pos = self.position(id)?;
        Ok(&self.records[pos])
    }

    // Replaces the record with the same id.
    pub fn update(&mut self, record: T) -> LedgerResult<()> {
        let pos = self.position(record.id())?;
        self.records[pos] = record;
        Ok(())
    }

    pub fn remove(&mut self, id: Uuid) -> LedgerResult<T> {
        let pos = self.position(id)?;
        Ok(self.records.remove(pos))
    }

    pub fn list(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn required(text: &str) -> LedgerResult<String> {
    let text = text.trim();
    if text.is_empty() {
        Err(LedgerError::UserError(EMPTY_NAME_MESSAGE.to_string()))
    } else {
        Ok(text.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub note: String,
}

impl Contact {
    pub fn new(name: &str) -> LedgerResult<Contact> {
        Ok(Contact {
            id: Uuid::new_v4(),
            name: required(name)?,
            phone: None,
            email: None,
            note: String::new(),
        })
    }
}

impl Record for Contact {
    const UNKNOWN_MESSAGE: &'static str = UNKNOWN_CONTACT_MESSAGE;

    fn id(&self) -> Uuid {
        self.id
    }
}

pub type ContactStore = RecordStore<Contact>;

impl RecordStore<Contact> {
    // Case-insensitive substring match on the name.
    pub fn search(&self, query: &str) -> Vec<&Contact> {
        let query = query.trim().to_lowercase();
        self.records
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&query))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: Uuid,
    pub file_name: String,
    pub size_bytes: u64,
    // Record the file belongs to, e.g. a contact or a calendar event
    #[serde(default)]
    pub owner: Option<Uuid>,
    pub added: DateTime<Utc>,
}

impl Attachment {
    pub fn new(file_name: &str, size_bytes: u64, owner: Option<Uuid>) -> LedgerResult<Attachment> {
        Ok(Attachment {
            id: Uuid::new_v4(),
            file_name: required(file_name)?,
            size_bytes,
            owner,
            added: Utc::now(),
        })
    }
}

impl Record for Attachment {
    const UNKNOWN_MESSAGE: &'static str = UNKNOWN_ATTACHMENT_MESSAGE;

    fn id(&self) -> Uuid {
        self.id
    }
}

pub type AttachmentStore = RecordStore<Attachment>;

impl RecordStore<Attachment> {
    pub fn for_owner(&self, owner: Uuid) -> Vec<&Attachment> {
        self.records
            .iter()
            .filter(|a| a.owner == Some(owner))
            .collect()
    }

    // Drops every attachment of `owner`. Returns how many were removed.
    pub fn remove_for_owner(&mut self, owner: Uuid) -> usize {
        let before = self.records.len();
        self.records.retain(|a| a.owner != Some(owner));
        let removed = before - self.records.len();
        if removed > 0 {
            log::info!("Removed {} attachment(s) of {}", removed, owner);
        }
        removed
    }

    pub fn total_size(&self) -> u64 {
        self.records.iter().map(|a| a.size_bytes).sum()
    }
}
