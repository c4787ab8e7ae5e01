use serde::{Deserialize, Serialize};
use std::fmt;

/// An abstract ledger-side capability tracked by the dependency rules.
///
/// Kinds are opaque tokens: they say that *something* in the flow supplies the
/// capability, never which node does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceKind {
    KeyPair,
    LiteIdentity,
    LiteTokenAccount,
    /// ACME sent to a lite account but not yet settled.
    PendingTokens,
    AcmeBalance,
    /// Credits purchased but not yet credited to the signer.
    PendingCredits,
    Credits,
    Adi,
    KeyBook,
    KeyPage,
    TokenAccount,
    DataAccount,
    LiteDataAccount,
    TokenIssuer,
    IssuedTokens,
    DataEntry,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 16] = [
        ResourceKind::KeyPair,
        ResourceKind::LiteIdentity,
        ResourceKind::LiteTokenAccount,
        ResourceKind::PendingTokens,
        ResourceKind::AcmeBalance,
        ResourceKind::PendingCredits,
        ResourceKind::Credits,
        ResourceKind::Adi,
        ResourceKind::KeyBook,
        ResourceKind::KeyPage,
        ResourceKind::TokenAccount,
        ResourceKind::DataAccount,
        ResourceKind::LiteDataAccount,
        ResourceKind::TokenIssuer,
        ResourceKind::IssuedTokens,
        ResourceKind::DataEntry,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            ResourceKind::KeyPair => "a signing keypair",
            ResourceKind::LiteIdentity => "a lite identity",
            ResourceKind::LiteTokenAccount => "a lite token account",
            ResourceKind::PendingTokens => "an incoming ACME transfer",
            ResourceKind::AcmeBalance => "a funded ACME balance",
            ResourceKind::PendingCredits => "a pending credit purchase",
            ResourceKind::Credits => "credits on the signer",
            ResourceKind::Adi => "an ADI identity",
            ResourceKind::KeyBook => "a key book",
            ResourceKind::KeyPage => "a key page",
            ResourceKind::TokenAccount => "an ADI token account",
            ResourceKind::DataAccount => "a data account",
            ResourceKind::LiteDataAccount => "a lite data account",
            ResourceKind::TokenIssuer => "a custom token issuer",
            ResourceKind::IssuedTokens => "issued custom tokens",
            ResourceKind::DataEntry => "a written data entry",
        }
    }

    fn bit(self) -> u32 {
        1 << (self as u32)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A compact set of resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ResourceSet(u32);

impl ResourceSet {
    pub const EMPTY: ResourceSet = ResourceSet(0);

    pub fn new() -> Self {
        Self::EMPTY
    }

    pub fn insert(&mut self, kind: ResourceKind) {
        self.0 |= kind.bit();
    }

    pub fn contains(&self, kind: ResourceKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn union(self, other: ResourceSet) -> ResourceSet {
        ResourceSet(self.0 | other.0)
    }

    pub fn intersection(self, other: ResourceSet) -> ResourceSet {
        ResourceSet(self.0 & other.0)
    }

    pub fn difference(self, other: ResourceSet) -> ResourceSet {
        ResourceSet(self.0 & !other.0)
    }

    pub fn intersects(&self, other: ResourceSet) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_superset(&self, other: ResourceSet) -> bool {
        other.0 & !self.0 == 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates the contained kinds in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = ResourceKind> + '_ {
        ResourceKind::ALL
            .iter()
            .copied()
            .filter(move |kind| self.contains(*kind))
    }
}

impl FromIterator<ResourceKind> for ResourceSet {
    fn from_iter<I: IntoIterator<Item = ResourceKind>>(iter: I) -> Self {
        let mut set = ResourceSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<ResourceKind> for ResourceSet {
    fn extend<I: IntoIterator<Item = ResourceKind>>(&mut self, iter: I) {
        for kind in iter {
            self.insert(kind);
        }
    }
}
