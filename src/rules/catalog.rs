//! The built-in prerequisite catalog for ledger operation blocks.
//!
//! Every operation type has exactly one entry here, even when it depends on nothing.
//! Recipes are written to be complete from an empty canvas; [`RuleTable::new`] replays
//! each one and rejects the catalog if a step would be missing something.
//!
//! [`RuleTable::new`]: super::RuleTable::new

use super::OperationType as Op;
use super::ResourceKind as Res;
use super::{PrerequisiteRule, ResourceRequirement as Req};

/// Keys, then ACME from the faucet, settled.
const FUNDED: &[Op] = &[Op::GenerateKeys, Op::Faucet, Op::WaitForBalance];

/// A funded lite account that has bought and received credits.
const CREDITED: &[Op] = &[
    Op::GenerateKeys,
    Op::Faucet,
    Op::WaitForBalance,
    Op::AddCredits,
    Op::WaitForCredits,
];

/// A credited signer that owns an ADI.
const WITH_IDENTITY: &[Op] = &[
    Op::GenerateKeys,
    Op::Faucet,
    Op::WaitForBalance,
    Op::AddCredits,
    Op::WaitForCredits,
    Op::CreateIdentity,
];

fn needs_credits() -> Req {
    Req::error(
        Res::Credits,
        "Signer needs credits to pay the transaction fee",
        &[Op::WaitForCredits],
    )
}

fn needs_keypair() -> Req {
    Req::error(
        Res::KeyPair,
        "A keypair is required to sign",
        &[Op::GenerateKeys],
    )
}

fn needs_identity() -> Req {
    Req::error(
        Res::Adi,
        "Requires an ADI to create the account under",
        &[Op::CreateIdentity],
    )
}

fn needs_acme() -> Req {
    Req::error(
        Res::AcmeBalance,
        "Requires a funded ACME balance",
        &[Op::WaitForBalance],
    )
}

fn with_recipe(steps: &[&[Op]]) -> Vec<Op> {
    steps.concat()
}

pub(super) fn standard_rules() -> Vec<PrerequisiteRule> {
    vec![
        // --- Key material and funding ---
        PrerequisiteRule::new(Op::GenerateKeys)
            .produces(&[Res::KeyPair, Res::LiteIdentity, Res::LiteTokenAccount])
            .explanation(
                "Generates a keypair and derives its lite identity and lite ACME token account.",
            ),
        PrerequisiteRule::new(Op::Faucet)
            .requires(Req::error(
                Res::LiteTokenAccount,
                "Faucet needs a lite token account to send ACME to",
                &[Op::GenerateKeys],
            ))
            .produces(&[Res::PendingTokens])
            .explanation("Requests test ACME from the network faucet into the lite token account.")
            .recipe(&[Op::GenerateKeys]),
        PrerequisiteRule::new(Op::WaitForBalance)
            .requires(Req::error(
                Res::PendingTokens,
                "Nothing has sent ACME to wait for",
                &[Op::Faucet, Op::SendTokens],
            ))
            .produces(&[Res::AcmeBalance])
            .explanation("Polls the token account until incoming ACME has settled.")
            .recipe(&[Op::GenerateKeys, Op::Faucet]),
        PrerequisiteRule::new(Op::AddCredits)
            .requires(needs_acme())
            .requires(needs_keypair())
            .produces(&[Res::PendingCredits])
            .explanation(
                "Converts ACME into credits at the current oracle price. Credits pay every \
                 transaction fee.",
            )
            .recipe(FUNDED),
        PrerequisiteRule::new(Op::WaitForCredits)
            .requires(Req::error(
                Res::PendingCredits,
                "No credit purchase to wait for",
                &[Op::AddCredits],
            ))
            .produces(&[Res::Credits])
            .explanation("Polls the signer until purchased credits are available.")
            .recipe(&with_recipe(&[FUNDED, &[Op::AddCredits]])),
        // --- Identities and accounts ---
        PrerequisiteRule::new(Op::CreateIdentity)
            .requires(needs_credits())
            .requires(needs_keypair())
            .produces(&[Res::Adi, Res::KeyBook, Res::KeyPage])
            .credit_cost(500)
            .explanation(
                "Creates an ADI together with its initial key book and key page, signed by the \
                 lite identity.",
            )
            .recipe(CREDITED),
        PrerequisiteRule::new(Op::CreateTokenAccount)
            .requires(needs_identity())
            .requires(needs_credits())
            .produces(&[Res::TokenAccount])
            .credit_cost(25)
            .explanation("Creates an ADI token account that can hold ACME or a custom token.")
            .recipe(WITH_IDENTITY),
        PrerequisiteRule::new(Op::CreateDataAccount)
            .requires(needs_identity())
            .requires(needs_credits())
            .produces(&[Res::DataAccount])
            .credit_cost(25)
            .explanation("Creates an ADI data account for recording data entries.")
            .recipe(WITH_IDENTITY),
        // --- Tokens ---
        PrerequisiteRule::new(Op::SendTokens)
            .requires(needs_acme())
            .requires(needs_credits())
            .requires(Req::warning(
                Res::TokenAccount,
                "Consider creating a recipient token account first",
                &[Op::CreateTokenAccount],
            ))
            .produces(&[Res::PendingTokens])
            .credit_cost(3)
            .explanation("Transfers tokens from a funded account to one or more recipients.")
            .recipe(CREDITED),
        PrerequisiteRule::new(Op::CreateToken)
            .requires(needs_identity())
            .requires(needs_credits())
            .produces(&[Res::TokenIssuer])
            .credit_cost(500)
            .explanation("Defines a custom token issued under an ADI.")
            .recipe(WITH_IDENTITY),
        PrerequisiteRule::new(Op::IssueTokens)
            .requires(Req::error(
                Res::TokenIssuer,
                "Tokens can only be issued by a token issuer",
                &[Op::CreateToken],
            ))
            .requires(needs_credits())
            .requires(Req::warning(
                Res::TokenAccount,
                "Issued tokens need a token account to land in",
                &[Op::CreateTokenAccount],
            ))
            .produces(&[Res::IssuedTokens])
            .credit_cost(3)
            .explanation("Mints custom tokens from the issuer to recipient accounts.")
            .recipe(&with_recipe(&[WITH_IDENTITY, &[Op::CreateToken]])),
        PrerequisiteRule::new(Op::BurnTokens)
            .requires(needs_acme())
            .requires(needs_credits())
            .credit_cost(1)
            .explanation("Permanently destroys tokens held by the signing account.")
            .recipe(CREDITED),
        // --- Data ---
        PrerequisiteRule::new(Op::WriteData)
            .requires(Req::error(
                Res::DataAccount,
                "Requires a data account to write to",
                &[Op::CreateDataAccount],
            ))
            .requires(needs_credits())
            .produces(&[Res::DataEntry])
            .credit_cost(1)
            .explanation("Appends a data entry to an ADI data account.")
            .recipe(&with_recipe(&[WITH_IDENTITY, &[Op::CreateDataAccount]])),
        PrerequisiteRule::new(Op::WriteDataTo)
            .requires(needs_credits())
            .produces(&[Res::LiteDataAccount, Res::DataEntry])
            .credit_cost(1)
            .explanation(
                "Writes a data entry to a lite data account derived from the entry's external IDs.",
            )
            .recipe(CREDITED),
        // --- Key management ---
        PrerequisiteRule::new(Op::CreateKeyBook)
            .requires(needs_identity())
            .requires(needs_credits())
            .produces(&[Res::KeyBook, Res::KeyPage])
            .credit_cost(100)
            .explanation("Creates an additional key book, seeded with the session key.")
            .recipe(WITH_IDENTITY),
        PrerequisiteRule::new(Op::CreateKeyPage)
            .requires(Req::error(
                Res::KeyBook,
                "Key pages are created inside a key book",
                &[Op::CreateIdentity, Op::CreateKeyBook],
            ))
            .requires(needs_credits())
            .produces(&[Res::KeyPage])
            .credit_cost(100)
            .explanation("Adds a key page to an existing key book.")
            .recipe(WITH_IDENTITY),
        PrerequisiteRule::new(Op::UpdateKeyPage)
            .requires(Req::error(
                Res::KeyPage,
                "Requires a key page to modify",
                &[Op::CreateIdentity, Op::CreateKeyBook, Op::CreateKeyPage],
            ))
            .requires(needs_credits())
            .credit_cost(3)
            .explanation("Adds, removes or updates keys and thresholds on a key page.")
            .recipe(WITH_IDENTITY),
        PrerequisiteRule::new(Op::UpdateKey)
            .requires(Req::error(
                Res::KeyPage,
                "Requires a key page holding the key to rotate",
                &[Op::CreateIdentity, Op::CreateKeyBook, Op::CreateKeyPage],
            ))
            .requires(needs_credits())
            .requires(Req::warning(
                Res::KeyPair,
                "Generate the replacement key before rotating",
                &[Op::GenerateKeys],
            ))
            .credit_cost(3)
            .explanation("Replaces the signing key on a key page.")
            .recipe(WITH_IDENTITY),
        // --- Credits and account administration ---
        PrerequisiteRule::new(Op::TransferCredits)
            .requires(needs_credits())
            .requires(Req::warning(
                Res::KeyPage,
                "Credits are usually transferred to a key page",
                &[Op::CreateIdentity, Op::CreateKeyPage],
            ))
            .credit_cost(1)
            .explanation("Moves credits from the signer to another key page or lite identity.")
            .recipe(CREDITED),
        PrerequisiteRule::new(Op::BurnCredits)
            .requires(needs_credits())
            .credit_cost(1)
            .explanation("Destroys credits held by the signer.")
            .recipe(CREDITED),
        PrerequisiteRule::new(Op::LockAccount)
            .requires(Req::error(
                Res::LiteTokenAccount,
                "Only lite token accounts can be locked",
                &[Op::GenerateKeys],
            ))
            .requires(needs_credits())
            .credit_cost(3)
            .explanation("Locks a lite token account until a given block height.")
            .recipe(CREDITED),
        PrerequisiteRule::new(Op::UpdateAccountAuth)
            .requires(needs_identity())
            .requires(Req::error(
                Res::KeyBook,
                "Requires a key book to grant or revoke authority",
                &[Op::CreateIdentity, Op::CreateKeyBook],
            ))
            .requires(needs_credits())
            .credit_cost(3)
            .explanation("Adds or removes key book authorities on an ADI account.")
            .recipe(WITH_IDENTITY),
        // --- Read-only ---
        PrerequisiteRule::new(Op::QueryAccount)
            .explanation("Reads an account's current state. No transaction is submitted."),
    ]
}
