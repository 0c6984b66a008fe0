use seqda_rsk_header::{RskHeaderClient, RskHeaderError};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use crate::fixture::{header_json, SYNTHETIC_BLOCK};

fn respond_with_result(
    result: serde_json::Value,
) -> impl Fn(&Request) -> ResponseTemplate + Send + Sync + 'static {
    move |request: &Request| {
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": body["id"],
            "result": result,
        }))
    }
}

#[tokio::test]
async fn test_header_by_number_requests_hex_block_without_transactions() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "method": "eth_getBlockByNumber",
            "params": ["0x4440a5", false],
        })))
        .respond_with(respond_with_result(header_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = RskHeaderClient::new(&server.uri())?;
    let header = client.verified_header_by_number(SYNTHETIC_BLOCK).await?;

    assert_eq!(header.hash(), header.reported_hash);
    Ok(())
}

#[tokio::test]
async fn test_unknown_block_is_not_found() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(respond_with_result(serde_json::Value::Null))
        .mount(&server)
        .await;

    let client = RskHeaderClient::new(&server.uri())?;
    let result = client.header_by_number(u64::MAX).await;

    assert!(matches!(result, Err(RskHeaderError::BlockNotFound(u64::MAX))));
    Ok(())
}

#[tokio::test]
async fn test_hash_mismatch_is_rejected() -> anyhow::Result<()> {
    let mut tampered = header_json();
    tampered["gasUsed"] = "0x5208".into();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(respond_with_result(tampered))
        .mount(&server)
        .await;

    let client = RskHeaderClient::new(&server.uri())?;
    assert!(client.header_by_number(SYNTHETIC_BLOCK).await.is_ok());
    assert!(matches!(
        client.verified_header_by_number(SYNTHETIC_BLOCK).await,
        Err(RskHeaderError::HashMismatch { .. })
    ));
    Ok(())
}

#[tokio::test]
#[ignore = "requires access to the public RSK testnet node"]
async fn test_testnet_headers_hash_as_reported() -> anyhow::Result<()> {
    let client = RskHeaderClient::new("https://public-node.testnet.rsk.co")?;
    for number in 4_472_997..4_473_002 {
        client.verified_header_by_number(number).await?;
    }
    Ok(())
}
