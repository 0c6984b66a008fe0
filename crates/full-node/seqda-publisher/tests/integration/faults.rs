use seqda_interface::{BlobLayout, DaError};
use seqda_mock_da::{MockDaBackend, MockFault};
use seqda_publisher::{CancellationToken, DaSession};

use crate::helpers::{mock_session, sequence, signer};

fn kind(err: &DaError) -> &'static str {
    match err {
        DaError::Submission(_) => "submission",
        DaError::Proof(_) => "proof",
        DaError::Inclusion(_) => "inclusion",
        _ => "other",
    }
}

#[tokio::test]
async fn test_backend_faults_map_to_errors() {
    let cases = [
        (MockFault::RejectSubmission, "submission"),
        (MockFault::ZeroHeight, "submission"),
        (MockFault::ProofUnavailable, "proof"),
        (MockFault::NotIncluded, "inclusion"),
        (MockFault::InclusionCheckError, "inclusion"),
    ];

    for (fault, expected) in cases {
        for layout in [BlobLayout::WholeSequence, BlobLayout::PerBatch] {
            let session = mock_session(layout);
            session.backend().inject_fault(fault).await;

            let err = session
                .post_sequence(&CancellationToken::new(), &sequence(&[b"A", b"B"]))
                .await
                .unwrap_err();

            assert_eq!(kind(&err), expected, "{fault:?} under {layout} produced {err:?}");
            assert!(!err.is_structural());
        }
    }
}

#[tokio::test]
async fn test_missing_blob_fails_retrieval() -> anyhow::Result<()> {
    let session = mock_session(BlobLayout::PerBatch);
    let cancel = CancellationToken::new();
    let message = session
        .post_sequence(&cancel, &sequence(&[b"A", b"B"]))
        .await?
        .encode();

    session.backend().inject_fault(MockFault::BlobMissing).await;
    let err = session.get_sequence(&cancel, &message).await.unwrap_err();

    assert!(matches!(err, DaError::Retrieval(_)));
    Ok(())
}

#[tokio::test]
async fn test_malformed_messages_fail_before_network_calls() {
    let session = mock_session(BlobLayout::PerBatch);
    let cancel = CancellationToken::new();

    for len in [0, 64, 65, 66, 104, 146] {
        let err = session
            .get_sequence(&cancel, &vec![1u8; len])
            .await
            .unwrap_err();
        assert!(
            matches!(err, DaError::InvalidMessageLength(actual) if actual == len),
            "length {len} produced {err:?}"
        );
    }
    assert_eq!(session.backend().stats().total(), 0);
}

#[tokio::test]
async fn test_layout_mismatch_is_structural() -> anyhow::Result<()> {
    let backend = MockDaBackend::new("rollup");
    let per_batch = DaSession::new(backend.clone(), BlobLayout::PerBatch, signer());
    let whole = DaSession::new(backend.clone(), BlobLayout::WholeSequence, signer());
    let cancel = CancellationToken::new();

    let multi = per_batch
        .post_sequence(&cancel, &sequence(&[b"A", b"B"]))
        .await?
        .encode();
    let fetches_before = backend.stats().blob_fetches;
    let err = whole.get_sequence(&cancel, &multi).await.unwrap_err();
    assert!(matches!(
        err,
        DaError::UnexpectedPointerCount { actual: 2, .. }
    ));
    assert_eq!(backend.stats().blob_fetches, fetches_before);

    // A single raw batch is not a sequence document.
    let single = per_batch
        .post_sequence(&cancel, &sequence(&[b"raw batch"]))
        .await?
        .encode();
    let err = whole.get_sequence(&cancel, &single).await.unwrap_err();
    assert!(matches!(err, DaError::SequenceDecode(_)));
    assert!(err.is_structural());
    Ok(())
}

#[tokio::test]
async fn test_failed_post_can_be_retried() -> anyhow::Result<()> {
    let session = mock_session(BlobLayout::PerBatch);
    let cancel = CancellationToken::new();
    let batches = sequence(&[b"A", b"B"]);

    session.backend().inject_fault(MockFault::NotIncluded).await;
    assert!(session.post_sequence(&cancel, &batches).await.is_err());
    session.backend().clear_fault(MockFault::NotIncluded).await;

    let message = session.post_sequence(&cancel, &batches).await?;
    assert_eq!(session.get_sequence(&cancel, &message.encode()).await?, batches);
    Ok(())
}
