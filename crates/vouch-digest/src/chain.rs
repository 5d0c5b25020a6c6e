use blake3::Hasher;
use serde::{Deserialize, Serialize};

use vouch_core::models::DigestHeads;

/// Which chain an event extends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainKind {
    Feedback,
    Revoke,
    Response,
}

impl ChainKind {
    pub const ALL: [ChainKind; 3] = [Self::Feedback, Self::Revoke, Self::Response];

    fn domain(self) -> &'static [u8] {
        match self {
            Self::Feedback => b"vouch.chain.feedback.v1",
            Self::Revoke => b"vouch.chain.revoke.v1",
            Self::Response => b"vouch.chain.response.v1",
        }
    }
}

/// The three chain heads of one entity. All heads start at zero bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DigestChain {
    heads: DigestHeads,
}

impl DigestChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_heads(heads: DigestHeads) -> Self {
        Self { heads }
    }

    pub fn heads(&self) -> DigestHeads {
        self.heads
    }

    pub fn head(&self, kind: ChainKind) -> [u8; 32] {
        match kind {
            ChainKind::Feedback => self.heads.feedback,
            ChainKind::Revoke => self.heads.revoke,
            ChainKind::Response => self.heads.response,
        }
    }

    /// Extend one chain with a leaf hash. Returns the new head.
    pub fn append(&mut self, kind: ChainKind, leaf: &[u8; 32]) -> [u8; 32] {
        let slot = match kind {
            ChainKind::Feedback => &mut self.heads.feedback,
            ChainKind::Revoke => &mut self.heads.revoke,
            ChainKind::Response => &mut self.heads.response,
        };
        *slot = step(kind, slot, leaf);
        *slot
    }

    /// Recompute a head from the zero head and an ordered list of leaves.
    pub fn replay<'a, I>(kind: ChainKind, leaves: I) -> [u8; 32]
    where
        I: IntoIterator<Item = &'a [u8; 32]>,
    {
        leaves
            .into_iter()
            .fold([0u8; 32], |head, leaf| step(kind, &head, leaf))
    }

    /// Whether replaying `leaves` reproduces the stored head of `kind`.
    pub fn verify<'a, I>(&self, kind: ChainKind, leaves: I) -> bool
    where
        I: IntoIterator<Item = &'a [u8; 32]>,
    {
        Self::replay(kind, leaves) == self.head(kind)
    }
}

fn step(kind: ChainKind, head: &[u8; 32], leaf: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Hasher::new();
    hasher.update(kind.domain());
    hasher.update(head);
    hasher.update(leaf);
    *hasher.finalize().as_bytes()
}
