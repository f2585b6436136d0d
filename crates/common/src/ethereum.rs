use std::{str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;
use ethers::{
    contract::abigen,
    core::types::{Address, TransactionRequest, H256},
    middleware::MiddlewareBuilder,
    prelude::{Http, LocalWallet, Provider, Signer, SignerMiddleware},
    providers::Middleware,
    types::TransactionReceipt,
};
use warpstack_cli_types::TokenMetadata;

abigen!(
    Erc20Token,
    r"[
        function name() external view returns (string)
        function symbol() external view returns (string)
        function decimals() external view returns (uint8)
        function totalSupply() external view returns (uint256)
    ]"
);

pub type EthersClient = Arc<SignerMiddleware<Provider<Http>, LocalWallet>>;

pub fn create_ethers_client(
    private_key: H256,
    rpc_url: String,
    chain_id: Option<u64>,
) -> anyhow::Result<EthersClient> {
    let mut wallet = LocalWallet::from_bytes(private_key.as_bytes())?;
    if let Some(chain_id) = chain_id {
        wallet = wallet.with_chain_id(chain_id);
    }
    let provider = Provider::<Http>::try_from(rpc_url)?.interval(Duration::from_millis(300));
    Ok(Arc::new(provider.with_signer(wallet)))
}

/// Reads ERC-20 metadata from an already-deployed token contract.
pub async fn fetch_erc20_metadata(
    client: EthersClient,
    token: Address,
) -> anyhow::Result<TokenMetadata> {
    let contract = Erc20Token::new(token, client);
    let name = contract.name().call().await.context("name() read failed")?;
    let symbol = contract
        .symbol()
        .call()
        .await
        .context("symbol() read failed")?;
    let decimals = contract
        .decimals()
        .call()
        .await
        .context("decimals() read failed")?;
    let total_supply = contract
        .total_supply()
        .call()
        .await
        .context("totalSupply() read failed")?;
    Ok(TokenMetadata {
        name,
        symbol,
        decimals,
        total_supply: Some(total_supply.to_string()),
    })
}

/// Submits a batch of transactions in order, waiting for one confirmation on
/// each before sending the next. Within-batch order is a correctness
/// requirement: approvals must land before the calls that depend on them.
pub async fn send_ordered_batch(
    client: EthersClient,
    txs: Vec<TransactionRequest>,
) -> anyhow::Result<Vec<TransactionReceipt>> {
    let mut receipts = Vec::with_capacity(txs.len());
    for tx in txs {
        let pending = client
            .send_transaction(tx, None)
            .await
            .context("failed to send transaction")?;
        let receipt = pending
            .confirmations(1)
            .await
            .context("failed to confirm transaction")?
            .context("transaction dropped from mempool")?;
        receipts.push(receipt);
    }
    Ok(receipts)
}

pub fn parse_address(raw: &str) -> anyhow::Result<Address> {
    Address::from_str(raw).with_context(|| format!("Invalid address: {raw}"))
}
