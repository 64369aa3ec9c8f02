//! # Mock Framework
//!
//! Utilities for testing the registration service without a running store.
//!
//! Use [`create_mock_store`] to get a store client and a receiver.
//! Then use helpers like [`expect_insert`] or [`expect_remove`] to assert behavior
//! and answer on the store's behalf.

use crate::actor_framework::{Entity, Response, StoreClient, StoreRequest};
use tokio::sync::mpsc;

/// Creates a store client whose requests land on the returned receiver.
///
/// No `StoreActor` is spawned. The test plays the store: it inspects each
/// request and decides the reply (hit, miss, taken id, or a closed channel
/// by dropping the receiver).
pub fn create_mock_store<T: Entity>(buffer_size: usize) -> (StoreClient<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Put request
pub async fn expect_put<T: Entity>(receiver: &mut mpsc::Receiver<StoreRequest<T>>) -> Option<(T, Response<()>)> {
    match receiver.recv().await {
        Some(StoreRequest::Put { record, respond_to }) => Some((record, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Insert request
pub async fn expect_insert<T: Entity>(receiver: &mut mpsc::Receiver<StoreRequest<T>>) -> Option<(T, Response<bool>)> {
    match receiver.recv().await {
        Some(StoreRequest::Insert { record, respond_to }) => Some((record, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(receiver: &mut mpsc::Receiver<StoreRequest<T>>) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Remove request
pub async fn expect_remove<T: Entity>(receiver: &mut mpsc::Receiver<StoreRequest<T>>) -> Option<(T::Id, Response<()>)> {
    match receiver.recv().await {
        Some(StoreRequest::Remove { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Student, StudentId};

    #[tokio::test]
    async fn test_mock_store() {
        let (client, mut receiver) = create_mock_store::<Student>(10);

        let put_task = tokio::spawn(async move {
            let student = Student::new(StudentId::from("student_1"), "Test", 18);
            client.put(student).await
        });

        let (record, responder) = expect_put(&mut receiver).await.expect("Expected Put request");
        assert_eq!(record.name(), "Test");
        responder.send(()).unwrap();

        let result = put_task.await.unwrap();
        assert_eq!(result, Ok(()));
    }
}
