//! Drive the bridge end to end with in-memory stand-ins.
//!
//! Run with `cargo run --example gateway_demo`.

#![allow(clippy::print_stdout)] // demo intentionally prints to stdout

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use radbridge::prelude::*;

/// Agent that signs everything it is asked to.
struct DemoAgent;

#[async_trait]
impl WalletAgent for DemoAgent {
    async fn address(&self) -> AgentResult<Address> {
        Ok(Address::from("addr_test1demoagent"))
    }

    async fn sign_message(&self, address: &Address, payload: &[u8]) -> AgentResult<SignedMessage> {
        Ok(SignedMessage {
            signature: [address.as_str().as_bytes(), payload].concat(),
            key: address.as_str().as_bytes().to_vec(),
        })
    }

    async fn sign_tx(&self, tx: &UnsignedTx) -> AgentResult<SignedTx> {
        Ok(SignedTx {
            bytes: tx.bytes.clone(),
        })
    }
}

/// Chain client that accepts every payment and every signature.
struct DemoChain;

#[async_trait]
impl Chain for DemoChain {
    fn name(&self) -> &'static str {
        "demo"
    }

    async fn build_payment(
        &self,
        _inputs: &[Utxo],
        _change_address: &Address,
        request: &PaymentRequest,
    ) -> ChainResult<UnsignedTx> {
        Ok(UnsignedTx {
            bytes: format!("pay:{}:{}", request.to, request.quantity).into_bytes(),
        })
    }

    fn verify_message(&self, address: &Address, payload: &[u8], signed: &SignedMessage) -> bool {
        signed.signature == [address.as_str().as_bytes(), payload].concat()
    }
}

/// Ledger holding two outputs, one of them carrying the demo asset.
struct DemoLedger {
    asset: AssetClass,
}

#[async_trait]
impl LedgerProvider for DemoLedger {
    fn name(&self) -> &'static str {
        "demo"
    }

    async fn utxos_at(&self, _address: &Address) -> ProviderResult<Vec<Utxo>> {
        Ok(vec![
            Utxo {
                tx_hash: TxHash("aa".into()),
                output_index: 0,
                value: Value::lovelace(2_000_000),
            },
            Utxo {
                tx_hash: TxHash("bb".into()),
                output_index: 1,
                value: Value::lovelace(1_000_000).with_asset(self.asset.clone(), 500),
            },
        ])
    }

    async fn submit(&self, _tx: &SignedTx) -> ProviderResult<TxHash> {
        Ok(TxHash(
            "39a7a284c2a0948189dc45dec670211cd4d72f7b66c5726c08d9b3df11e44d58".into(),
        ))
    }

    async fn tx_confirmed(&self, _hash: &TxHash) -> ProviderResult<bool> {
        Ok(true)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let values = NetworkValues::resolve(&BridgeSettings {
        network: NetworkSelector::Preview,
        project_id: Some("previewdemo".into()),
        prize_address: Some("addr_test1prize".into()),
        policy_id: Some("ab".repeat(28)),
        asset_name: None,
    })?;

    let ledger = DemoLedger {
        asset: values.asset.clone(),
    };
    let gateway = Arc::new(
        BridgeGateway::builder()
            .values(values)
            .chain(Arc::new(DemoChain))
            .provider(Arc::new(ledger))
            .confirmation(ConfirmationPolicy {
                interval: Duration::from_millis(50),
                timeout: Duration::from_secs(5),
            })
            .build(),
    );
    gateway
        .directory()
        .register(SupportedAgent::Nami, Arc::new(DemoAgent))
        .await;

    println!("startup flags: {:?}", gateway.startup_flags().await);

    let bus = gateway.bus().clone();
    let mut events = bus.subscribe();
    let runner = {
        let gateway = Arc::clone(&gateway);
        tokio::spawn(async move { gateway.run().await })
    };

    let requests = vec![
        BridgeRequest::ConnectWallet("nami".into()),
        BridgeRequest::Login,
        BridgeRequest::QueryBalance,
        BridgeRequest::SubmitPayment {
            address: "darcshub/demo".into(),
            quantity: 100,
        },
    ];
    for request in requests {
        bus.publish_request(request).await?;
        let event = events
            .recv()
            .await
            .map_err(|e| BridgeError::internal(e.to_string()))?;
        println!("event: {}", serde_json::to_string(&event)?);
    }

    runner.abort();
    Ok(())
}
