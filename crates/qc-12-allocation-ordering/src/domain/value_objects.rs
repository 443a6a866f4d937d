//! Value objects for Allocation Ordering

use serde::{Deserialize, Serialize};
use std::fmt;

/// Vertex index inside one block's allocation graph
pub type VertexIndex = usize;

/// Position of a transaction inside the block (0 is the coinbase)
pub type TxPosition = usize;

/// Fee / allocation amount in base units
pub type Amount = i64;

/// Account identity (alias) used as a graph vertex key.
///
/// Keyed on the raw alias bytes; the lossy UTF-8 form is for display only.
/// Only meaningful for the block being processed; never persisted.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Identity(Vec<u8>);

impl Identity {
    pub fn new(alias: impl AsRef<[u8]>) -> Self {
        Self(alias.as_ref().to_vec())
    }

    /// Identity from raw alias argument bytes
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

impl From<&str> for Identity {
    fn from(alias: &str) -> Self {
        Self::new(alias)
    }
}

/// Alias-annotated envelope of a transaction.
///
/// `args[0]` carries the sender identity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AliasEnvelope {
    pub args: Vec<Vec<u8>>,
}

impl AliasEnvelope {
    pub fn new(args: Vec<Vec<u8>>) -> Self {
        Self { args }
    }

    /// Envelope whose only argument is the given sender alias
    pub fn for_sender(sender: impl AsRef<[u8]>) -> Self {
        Self {
            args: vec![sender.as_ref().to_vec()],
        }
    }

    pub fn sender(&self) -> Option<Identity> {
        self.args.first().map(|arg| Identity::from_bytes(arg))
    }
}

/// Decoded asset allocation payload
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssetAllocation {
    /// (receiver, amount) pairs in payload order
    pub sending: Vec<(Identity, Amount)>,
}

impl AssetAllocation {
    pub fn new(sending: Vec<(Identity, Amount)>) -> Self {
        Self { sending }
    }

    pub fn receivers(&self) -> impl Iterator<Item = &Identity> {
        self.sending.iter().map(|(receiver, _)| receiver)
    }
}

/// An elementary circuit: vertices in traversal order, start not repeated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Circuit(pub Vec<VertexIndex>);

impl Circuit {
    pub fn vertices(&self) -> &[VertexIndex] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A self-loop is a one-vertex circuit
    pub fn is_self_loop(&self) -> bool {
        self.0.len() == 1
    }
}
