use proptest::prelude::*;
use seqda_interface::secp256k1::{PublicKey, SECP256K1};
use seqda_interface::{signer_address, BlobLayout, DaMessage, Sequence};
use seqda_publisher::CancellationToken;

use crate::helpers::{mock_session, sequence, signer};

const RECORDED_SIGNATURE: &str = "a890635d027675de52aaa6dd0ffec3593ade0c4309139f3c7d61ec4c2c5e146654dbb150f00fe8dbad3e2115c63e8068527de99d254354d28f5212b4a78cf4161c";

#[tokio::test]
async fn test_post_and_get_test_data() -> anyhow::Result<()> {
    let session = mock_session(BlobLayout::WholeSequence);
    let cancel = CancellationToken::new();
    let batches = sequence(&[b"testData", b"testData2", b"testData3"]);

    let message = session.post_sequence(&cancel, &batches).await?.encode();

    assert_eq!(message.len(), 105);
    assert_eq!(hex::encode(&message[..65]), RECORDED_SIGNATURE);

    let decoded = session.get_sequence(&cancel, &message).await?;
    assert_eq!(decoded, batches);
    assert_eq!(std::str::from_utf8(&decoded.batches()[0])?, "testData");
    Ok(())
}

#[tokio::test]
async fn test_posted_message_is_attributable() -> anyhow::Result<()> {
    let session = mock_session(BlobLayout::PerBatch);
    let batches = sequence(&[b"testData", b"testData2", b"testData3"]);

    let message = session
        .post_sequence(&CancellationToken::new(), &batches)
        .await?;
    let signer_key = PublicKey::from_secret_key(SECP256K1, &signer());

    session.verify_message(&message.encode(), &batches, &signer_key)?;
    let recovered = message.signature().recover_signer(&batches)?;
    assert_eq!(
        hex::encode(signer_address(&recovered)),
        "2eaeeb898dfe79e806d85ae31750ab34f714c211"
    );
    Ok(())
}

#[tokio::test]
async fn test_unusual_batches_roundtrip() -> anyhow::Result<()> {
    let large = vec![0xa5; 256 * 1024];
    let cases = [
        sequence(&[b""]),
        sequence(&[b"", b"", b""]),
        sequence(&[&[0u8; 1], &[0xff; 3], b"0x1234", b"\"quoted\""]),
        sequence(&[&large, b"tail"]),
    ];

    for layout in [BlobLayout::WholeSequence, BlobLayout::PerBatch] {
        let session = mock_session(layout);
        let cancel = CancellationToken::new();
        for batches in &cases {
            let message = session.post_sequence(&cancel, batches).await?;
            let decoded = session.get_sequence(&cancel, &message.encode()).await?;
            assert_eq!(&decoded, batches, "layout {layout}");
        }
    }
    Ok(())
}

#[tokio::test]
async fn test_identical_payloads_resolve_independently() -> anyhow::Result<()> {
    let session = mock_session(BlobLayout::PerBatch);
    let cancel = CancellationToken::new();
    let batches = sequence(&[b"same", b"other", b"same"]);

    let message = session.post_sequence(&cancel, &batches).await?;
    let pointers = message.pointers();
    assert_eq!(pointers[0].commitment, pointers[2].commitment);
    assert_ne!(pointers[0].height, pointers[2].height);

    assert_eq!(session.get_sequence(&cancel, &message.encode()).await?, batches);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_any_sequence_roundtrips(
        batches in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..512), 1..12),
        per_batch in any::<bool>(),
    ) {
        let layout = if per_batch { BlobLayout::PerBatch } else { BlobLayout::WholeSequence };
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        let sequence = Sequence::new(batches);

        let (message, decoded) = runtime.block_on(async {
            let session = mock_session(layout);
            let cancel = CancellationToken::new();
            let message = session.post_sequence(&cancel, &sequence).await.unwrap().encode();
            let decoded = session.get_sequence(&cancel, &message).await.unwrap();
            (message, decoded)
        });

        let expected_pointers = if per_batch { sequence.len() } else { 1 };
        prop_assert_eq!(DaMessage::decode(&message).unwrap().pointers().len(), expected_pointers);
        prop_assert_eq!(decoded, sequence);
    }
}
