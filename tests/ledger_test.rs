//! Runs the router against a local Anvil node.
//!
//! Anvil derives its funded accounts from the default test mnemonic, so the house
//! mnemonic below controls the first funded account.
#![cfg(feature = "anvil")]

use alloy::node_bindings::{Anvil, AnvilInstance};
use eyre::Result;
use house_router::{EvmLedger, Ledger, ResponseEnvelope, Router, RouterConfig};
use serde_json::{json, Value};

const HOUSE_MNEMONIC: &str = "test test test test test test test test test test test junk";

async fn setup() -> Result<(Router<EvmLedger>, AnvilInstance)> {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Off)
        .filter_module("house_router", log::LevelFilter::Debug)
        .is_test(true)
        .try_init();

    let anvil = Anvil::new().try_spawn()?;
    let house_address = anvil.addresses()[0].to_string();
    let config = RouterConfig::new(anvil.endpoint_url(), &house_address, HOUSE_MNEMONIC)?;
    let ledger = EvmLedger::new(config.rpc_url.clone()).await?;

    Ok((Router::new(config.house, ledger), anvil))
}

fn event(method: &str, body: Value) -> Value {
    json!({ "method": method, "body": body.to_string() })
}

fn decode(response: &ResponseEnvelope) -> Value {
    response.json().expect("body should be JSON")
}

#[tokio::test]
async fn test_balance() -> Result<()> {
    let (router, anvil) = setup().await?;
    assert_eq!(router.ledger().chain().id(), anvil.chain_id());
    let address = anvil.addresses()[1].to_string();

    let response = router
        .handle(&event("balance", json!({ "address": address })))
        .await;
    assert_eq!(response.status_code, 200);
    assert_eq!(decode(&response)["balance"].as_f64(), Some(10000.0));

    // invalid addresses fail within the ledger
    let response = router
        .handle(&event("balance", json!({ "address": "not-an-address" })))
        .await;
    assert_eq!(response.status_code, 500);

    Ok(())
}

#[tokio::test]
async fn test_send_to_user_and_back() -> Result<()> {
    let (router, anvil) = setup().await?;
    let user = router.ledger().create_wallet().await?;

    // house pays the user
    let response = router
        .handle(&event(
            "send_to_user",
            json!({ "toAddress": user.address, "amount": "2.5" }),
        ))
        .await;
    assert_eq!(response.status_code, 200, "{}", response.body);
    let body = decode(&response);
    assert!(body["txId"].as_str().unwrap().starts_with("0x"));
    assert!(body["round"].as_u64().unwrap() > 0);
    assert_eq!(router.ledger().balance(&user.address).await?, 2.5);

    // user pays the house back
    let house_before = router
        .ledger()
        .balance(&anvil.addresses()[0].to_string())
        .await?;
    let response = router
        .handle(&event(
            "send_to_house",
            json!({ "fromMnemonic": user.mnemonic, "amount": 1 }),
        ))
        .await;
    assert_eq!(response.status_code, 200, "{}", response.body);
    let house_after = router
        .ledger()
        .balance(&anvil.addresses()[0].to_string())
        .await?;
    assert!((house_after - house_before - 1.0).abs() < 1e-9);
    assert!(router.ledger().balance(&user.address).await? < 1.5);

    Ok(())
}

#[tokio::test]
async fn test_transfer_failures() -> Result<()> {
    let (router, _anvil) = setup().await?;
    let user = router.ledger().create_wallet().await?;

    // an unfunded wallet cannot pay
    let response = router
        .handle(&event(
            "send_to_house",
            json!({ "fromMnemonic": user.mnemonic, "amount": 1 }),
        ))
        .await;
    assert_eq!(response.status_code, 500);
    let body = decode(&response);
    assert!(body["error"].is_string());
    assert!(body["details"].is_string());

    // mnemonic that is not a valid phrase
    let response = router
        .handle(&event(
            "send_to_house",
            json!({ "fromMnemonic": "not a real phrase", "amount": 1 }),
        ))
        .await;
    assert_eq!(response.status_code, 500);
    let body = decode(&response);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid mnemonic: "));
    assert_eq!(body["error"], body["details"]);

    // negative amounts are numeric, but rejected by the ledger
    let response = router
        .handle(&event(
            "send_to_user",
            json!({ "toAddress": user.address, "amount": -1 }),
        ))
        .await;
    assert_eq!(response.status_code, 500);

    Ok(())
}
