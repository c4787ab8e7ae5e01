use crate::error::FlowConversionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Master macro declaring every operation type, its display label, and its string mapping.
///
/// Declaration order is also the dense index used by the rule table.
macro_rules! define_operations {
    ( $( ($variant:ident, $label:expr) ),* $(,)? ) => {
        /// A ledger operation a flow block can perform.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum OperationType {
            $( $variant, )*
        }

        impl OperationType {
            /// Every operation type, in declaration order.
            pub const ALL: &'static [OperationType] = &[ $( OperationType::$variant, )* ];

            /// The canonical type name, as used by the flow editor.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( OperationType::$variant => stringify!($variant), )*
                }
            }

            /// A human-readable block title.
            pub fn label(&self) -> &'static str {
                match self {
                    $( OperationType::$variant => $label, )*
                }
            }
        }

        impl FromStr for OperationType {
            type Err = FlowConversionError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( stringify!($variant) => Ok(OperationType::$variant), )*
                    other => Err(FlowConversionError::UnknownOperationType(other.to_string())),
                }
            }
        }
    };
}

define_operations! {
    // Key material and funding
    (GenerateKeys, "Generate Keys"),
    (Faucet, "Faucet"),
    (WaitForBalance, "Wait for Balance"),
    (AddCredits, "Add Credits"),
    (WaitForCredits, "Wait for Credits"),

    // Identities and accounts
    (CreateIdentity, "Create Identity"),
    (CreateTokenAccount, "Create Token Account"),
    (CreateDataAccount, "Create Data Account"),

    // Tokens
    (SendTokens, "Send Tokens"),
    (CreateToken, "Create Token"),
    (IssueTokens, "Issue Tokens"),
    (BurnTokens, "Burn Tokens"),

    // Data
    (WriteData, "Write Data"),
    (WriteDataTo, "Write Data To"),

    // Key management
    (CreateKeyBook, "Create Key Book"),
    (CreateKeyPage, "Create Key Page"),
    (UpdateKeyPage, "Update Key Page"),
    (UpdateKey, "Update Key"),

    // Credits and account administration
    (TransferCredits, "Transfer Credits"),
    (BurnCredits, "Burn Credits"),
    (LockAccount, "Lock Account"),
    (UpdateAccountAuth, "Update Account Auth"),

    // Read-only
    (QueryAccount, "Query Account"),
}

impl OperationType {
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
