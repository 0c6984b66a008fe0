use std::time::Duration;

use seqda_interface::BlobLayout;
use seqda_mock_da::MockDaBackend;
use seqda_publisher::{CancellationToken, DaSession};

use crate::helpers::{mock_session, sequence, signer};

async fn delay(session: &DaSession<MockDaBackend>, payload: &[u8], millis: u64) {
    session
        .backend()
        .set_submission_delay(payload.to_vec(), Duration::from_millis(millis))
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_pointers_follow_batch_order_not_confirmation_order() -> anyhow::Result<()> {
    let session = mock_session(BlobLayout::PerBatch);
    let cancel = CancellationToken::new();
    delay(&session, b"A", 200).await;
    delay(&session, b"C", 100).await;

    let batches = sequence(&[b"A", b"B", b"C"]);
    let message = session.post_sequence(&cancel, &batches).await?;

    // "B" confirms first, then "C", then "A".
    let heights: Vec<u64> = message.pointers().iter().map(|p| p.height).collect();
    assert_eq!(heights, vec![3, 1, 2]);

    let decoded = session.get_sequence(&cancel, &message.encode()).await?;
    assert_eq!(decoded, batches);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_single_in_flight_blob_submits_sequentially() -> anyhow::Result<()> {
    let session = mock_session(BlobLayout::PerBatch).with_max_in_flight_blobs(1)?;
    let cancel = CancellationToken::new();
    delay(&session, b"A", 200).await;
    delay(&session, b"C", 100).await;
    let start = tokio::time::Instant::now();

    let message = session
        .post_sequence(&cancel, &sequence(&[b"A", b"B", b"C"]))
        .await?;

    let heights: Vec<u64> = message.pointers().iter().map(|p| p.height).collect();
    assert_eq!(heights, vec![1, 2, 3]);
    assert!(start.elapsed() >= Duration::from_millis(300));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_blobs_are_submitted_concurrently() -> anyhow::Result<()> {
    let session = mock_session(BlobLayout::PerBatch);
    for payload in [b"A", b"B", b"C"] {
        delay(&session, payload, 100).await;
    }
    let start = tokio::time::Instant::now();

    session
        .post_sequence(&CancellationToken::new(), &sequence(&[b"A", b"B", b"C"]))
        .await?;

    assert!(start.elapsed() < Duration::from_millis(200));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_posts_share_one_session() -> anyhow::Result<()> {
    let session = DaSession::new(MockDaBackend::new("rollup"), BlobLayout::PerBatch, signer());
    let cancel = CancellationToken::new();
    delay(&session, b"first-1", 50).await;

    let first = sequence(&[b"first-1", b"first-2"]);
    let second = sequence(&[b"second-1", b"second-2", b"second-3"]);
    let (first_message, second_message) = tokio::join!(
        session.post_sequence(&cancel, &first),
        session.post_sequence(&cancel, &second)
    );

    assert_eq!(
        session.get_sequence(&cancel, &first_message?.encode()).await?,
        first
    );
    assert_eq!(
        session.get_sequence(&cancel, &second_message?.encode()).await?,
        second
    );
    assert_eq!(session.backend().head_height().await, 5);
    Ok(())
}
