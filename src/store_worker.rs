use std::sync::Arc;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::logger;
use crate::models::{Envelope, StoreRequest, StoreResponse};
use crate::store::VocabStore;

/// Performs one request against the store.
pub async fn execute<S: VocabStore + ?Sized>(store: &S, request: StoreRequest) -> StoreResponse {
    match request {
        StoreRequest::Query { ticket, query } => StoreResponse::Page {
            ticket,
            result: store.query(&query).await,
        },
        StoreRequest::Create(vocab) => {
            let result = store.create(&vocab).await;
            StoreResponse::Created { vocab, result }
        }
        StoreRequest::Delete { id } => StoreResponse::Deleted {
            id,
            result: store.delete(id).await,
        },
        StoreRequest::FetchBatch => StoreResponse::Batch(store.practice_batch().await),
        StoreRequest::SubmitResults(results) => {
            StoreResponse::Submitted(store.submit_results(&results).await)
        }
        StoreRequest::PracticeCount => StoreResponse::PracticeCount(store.practice_count().await),
    }
}

/// Receives requests from the UI loop and runs each on its own task, so
/// responses come back in completion order rather than issue order.
pub fn spawn_store_worker<S: VocabStore + 'static>(
    store: Arc<S>,
    mut requests: UnboundedReceiver<Envelope<StoreRequest>>,
    responses: UnboundedSender<Envelope<StoreResponse>>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(Envelope {
            generation,
            payload,
        }) = requests.recv().await
        {
            logger::debug(&format!("Worker received {:?}", payload));
            let store = Arc::clone(&store);
            let responses = responses.clone();
            tokio::spawn(async move {
                let payload = execute(store.as_ref(), payload).await;
                if responses
                    .send(Envelope {
                        generation,
                        payload,
                    })
                    .is_err()
                {
                    logger::debug("Response channel closed, dropping store response");
                }
            });
        }
        logger::log("Worker channel disconnected, exiting");
    })
}
