use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any record must implement to be held by a [`StoreActor`].
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// Key the record is stored under.
    fn id(&self) -> &Self::Id;
}

/// Failures talking to the store actor. Absence of a record is never one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("store actor closed")]
    Closed,
    #[error("store actor dropped the request")]
    Dropped,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<T>;

#[derive(Debug)]
pub enum StoreRequest<T: Entity> {
    Put {
        record: T,
        respond_to: Response<()>,
    },
    Insert {
        record: T,
        respond_to: Response<bool>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Remove {
        id: T::Id,
        respond_to: Response<()>,
    },
    Len {
        respond_to: Response<usize>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Owns the record map. Requests are applied one at a time, so every
/// operation is atomic with respect to every other.
pub struct StoreActor<T: Entity> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    records: HashMap<T::Id, T>,
}

impl<T: Entity> StoreActor<T> {
    pub fn new(buffer_size: usize) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size.max(1));
        let actor = Self {
            receiver,
            records: HashMap::new(),
        };
        (actor, StoreClient::new(sender))
    }

    /// Runs until every [`StoreClient`] has been dropped.
    #[instrument(name = "store_actor", skip(self))]
    pub async fn run(mut self) {
        info!("StoreActor starting");
        while let Some(msg) = self.receiver.recv().await {
            self.handle(msg);
        }
        info!(records = self.records.len(), "StoreActor stopped");
    }

    fn handle(&mut self, msg: StoreRequest<T>) {
        match msg {
            StoreRequest::Put { record, respond_to } => {
                debug!(id = %record.id(), "put");
                self.records.insert(record.id().clone(), record);
                let _ = respond_to.send(());
            }
            StoreRequest::Insert { record, respond_to } => {
                let inserted = if self.records.contains_key(record.id()) {
                    debug!(id = %record.id(), "insert rejected, key taken");
                    false
                } else {
                    debug!(id = %record.id(), "insert");
                    self.records.insert(record.id().clone(), record);
                    true
                };
                let _ = respond_to.send(inserted);
            }
            StoreRequest::Get { id, respond_to } => {
                let _ = respond_to.send(self.records.get(&id).cloned());
            }
            StoreRequest::Remove { id, respond_to } => {
                if self.records.remove(&id).is_some() {
                    debug!(%id, "removed");
                }
                let _ = respond_to.send(());
            }
            StoreRequest::Len { respond_to } => {
                let _ = respond_to.send(self.records.len());
            }
        }
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct StoreClient<T: Entity> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

impl<T: Entity> StoreClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> StoreRequest<T>,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)
    }

    /// Inserts or overwrites the record under its id.
    pub async fn put(&self, record: T) -> Result<(), StoreError> {
        self.request(|respond_to| StoreRequest::Put { record, respond_to }).await
    }

    /// Inserts only if the id is free. Returns `false` when the key is taken.
    pub async fn insert(&self, record: T) -> Result<bool, StoreError> {
        self.request(|respond_to| StoreRequest::Insert { record, respond_to }).await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        self.request(|respond_to| StoreRequest::Get { id, respond_to }).await
    }

    /// Removing an absent id is a no-op.
    pub async fn remove(&self, id: T::Id) -> Result<(), StoreError> {
        self.request(|respond_to| StoreRequest::Remove { id, respond_to }).await
    }

    pub async fn len(&self) -> Result<usize, StoreError> {
        self.request(|respond_to| StoreRequest::Len { respond_to }).await
    }
}

// =============================================================================
// 5. TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: String,
        text: String,
    }

    impl Note {
        fn new(id: &str, text: &str) -> Self {
            Self {
                id: id.to_string(),
                text: text.to_string(),
            }
        }
    }

    impl Entity for Note {
        type Id = String;

        fn id(&self) -> &String {
            &self.id
        }
    }

    fn start() -> StoreClient<Note> {
        let (actor, client) = StoreActor::new(8);
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn test_put_get_remove() {
        let client = start();

        client.put(Note::new("n1", "first")).await.unwrap();
        let found = client.get("n1".to_string()).await.unwrap();
        assert_eq!(found, Some(Note::new("n1", "first")));

        client.remove("n1".to_string()).await.unwrap();
        assert_eq!(client.get("n1".to_string()).await.unwrap(), None);
        assert_eq!(client.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let client = start();

        client.put(Note::new("n1", "first")).await.unwrap();
        client.put(Note::new("n1", "second")).await.unwrap();

        let found = client.get("n1".to_string()).await.unwrap().unwrap();
        assert_eq!(found.text, "second");
        assert_eq!(client.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_insert_keeps_existing_entry() {
        let client = start();

        assert!(client.insert(Note::new("n1", "first")).await.unwrap());
        assert!(!client.insert(Note::new("n1", "second")).await.unwrap());

        let found = client.get("n1".to_string()).await.unwrap().unwrap();
        assert_eq!(found.text, "first");
    }

    #[tokio::test]
    async fn test_missing_keys_are_not_errors() {
        let client = start();

        assert_eq!(client.get("missing".to_string()).await.unwrap(), None);
        client.remove("missing".to_string()).await.unwrap();
        assert_eq!(client.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_puts_are_not_lost() {
        let client = start();

        let tasks: Vec<_> = (0..64)
            .map(|i| {
                let client = client.clone();
                tokio::spawn(async move {
                    client.put(Note::new(&format!("n{i}"), "text")).await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(client.len().await.unwrap(), 64);
    }

    #[tokio::test]
    async fn test_closed_actor_reports_error() {
        let (actor, client) = StoreActor::<Note>::new(8);
        drop(actor);

        assert_eq!(client.get("n1".to_string()).await, Err(StoreError::Closed));
    }
}
