//! # Shared Fixtures
//!
//! Versioned wire-like transactions and a decoder for the allocation
//! ordering subsystem, plus seeded random block generators.

use qc_12_allocation_ordering::{
    AliasEnvelope, AllocationDecoder, Amount, AssetAllocation, Block, BlockTemplate, BlockTotals,
    BlockTransaction, Identity,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Transaction version carrying alias / asset envelopes
pub const ALLOCATION_TX_VERSION: i32 = 0x7400;

/// Plain transaction version
pub const STANDARD_TX_VERSION: i32 = 2;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WireTransaction {
    pub txid: u64,
    pub version: i32,
    pub alias_args: Vec<Vec<u8>>,
    pub allocation: Option<Vec<(String, Amount)>>,
    pub size: u64,
}

impl WireTransaction {
    pub fn coinbase() -> Self {
        Self::transfer(0)
    }

    pub fn transfer(txid: u64) -> Self {
        Self {
            txid,
            version: STANDARD_TX_VERSION,
            alias_args: vec![],
            allocation: None,
            size: 180 + txid % 40,
        }
    }

    /// Alias-annotated transaction that moves no asset
    pub fn alias_update(txid: u64, alias: &str) -> Self {
        Self {
            version: ALLOCATION_TX_VERSION,
            alias_args: vec![alias.as_bytes().to_vec(), b"pubdata".to_vec()],
            ..Self::transfer(txid)
        }
    }

    pub fn allocation(txid: u64, sender: &str, sending: &[(&str, Amount)]) -> Self {
        Self {
            version: ALLOCATION_TX_VERSION,
            alias_args: vec![sender.as_bytes().to_vec()],
            allocation: Some(
                sending
                    .iter()
                    .map(|(receiver, amount)| (receiver.to_string(), *amount))
                    .collect(),
            ),
            size: 250 + 34 * sending.len() as u64,
            ..Self::transfer(txid)
        }
    }

    pub fn receiver_count(&self) -> usize {
        self.allocation.as_ref().map(Vec::len).unwrap_or(0)
    }
}

impl BlockTransaction for WireTransaction {
    fn serialized_size(&self) -> u64 {
        self.size
    }
}

/// Decoder gated on the allocation transaction version
#[derive(Clone, Copy, Debug, Default)]
pub struct VersionedDecoder;

impl AllocationDecoder for VersionedDecoder {
    type Transaction = WireTransaction;

    fn decode_alias(&self, tx: &WireTransaction) -> Option<AliasEnvelope> {
        if tx.version != ALLOCATION_TX_VERSION || tx.alias_args.is_empty() {
            return None;
        }
        Some(AliasEnvelope::new(tx.alias_args.clone()))
    }

    fn decode_allocation(&self, tx: &WireTransaction) -> Option<AssetAllocation> {
        if tx.version != ALLOCATION_TX_VERSION {
            return None;
        }
        tx.allocation.as_ref().map(|sending| {
            AssetAllocation::new(
                sending
                    .iter()
                    .map(|(receiver, amount)| (Identity::new(receiver.as_str()), *amount))
                    .collect(),
            )
        })
    }
}

/// Build a template with per-transaction fees and sig-ops plus matching totals
pub fn assemble(
    transactions: Vec<WireTransaction>,
) -> (BlockTemplate<WireTransaction>, BlockTotals) {
    let tx_fees: Vec<Amount> = transactions
        .iter()
        .enumerate()
        .map(|(i, tx)| if i == 0 { -1 } else { (tx.size / 10) as Amount })
        .collect();
    let tx_sig_ops: Vec<u32> = transactions
        .iter()
        .map(|tx| 1 + tx.receiver_count() as u32)
        .collect();

    let totals = BlockTotals {
        fees: tx_fees.iter().skip(1).sum(),
        sig_ops: tx_sig_ops.iter().sum(),
        size: transactions.iter().map(|tx| tx.size).sum(),
        tx_count: transactions.len() as u64,
    };

    (
        BlockTemplate::new(Block::new(transactions), tx_fees, tx_sig_ops),
        totals,
    )
}

/// Seeded random block.
///
/// Every non-coinbase transaction is an allocation with probability
/// `allocation_ratio`, sending to 1-3 of `identity_count` identities.
pub fn random_block(
    seed: u64,
    tx_count: usize,
    identity_count: usize,
    allocation_ratio: f64,
) -> Vec<WireTransaction> {
    let mut rng = StdRng::seed_from_u64(seed);
    let name = |i: usize| format!("alias-{}", i);

    let mut transactions = vec![WireTransaction::coinbase()];
    for txid in 1..=tx_count as u64 {
        if !rng.gen_bool(allocation_ratio) {
            transactions.push(WireTransaction::transfer(txid));
            continue;
        }
        let sender = name(rng.gen_range(0..identity_count));
        let receivers: Vec<(String, Amount)> = (0..rng.gen_range(1..=3))
            .map(|_| (name(rng.gen_range(0..identity_count)), rng.gen_range(1..10_000)))
            .collect();
        let sending: Vec<(&str, Amount)> = receivers
            .iter()
            .map(|(receiver, amount)| (receiver.as_str(), *amount))
            .collect();
        transactions.push(WireTransaction::allocation(txid, &sender, &sending));
    }
    transactions
}

/// Acyclic block: alias-i funds alias-(i+1), emitted in reverse order
pub fn reversed_chain_block(length: usize) -> Vec<WireTransaction> {
    let mut transactions = vec![WireTransaction::coinbase()];
    for (txid, i) in (0..length).rev().enumerate() {
        let sender = format!("alias-{}", i);
        let receiver = format!("alias-{}", i + 1);
        transactions.push(WireTransaction::allocation(
            txid as u64 + 1,
            &sender,
            &[(receiver.as_str(), 1)],
        ));
    }
    transactions
}
