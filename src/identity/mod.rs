//! Caller identity subsystem.
//!
//! # Data Flow
//! ```text
//! Request (Authorization header, extensions)
//!     → CallerLookup (injected: in-memory, remote, database)
//!     → CallerIdentity (owned identifiers + granted scopes)
//!     → read by scope and resource stages
//! ```
//!
//! # Design Decisions
//! - Lookup is an injected async capability, resolved once per request
//! - Identity is read-only after lookup
//! - A missing identity owns nothing and grants nothing

pub mod store;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

pub use store::{CallerLookup, InMemoryCallerStore};

/// Kinds of identifiers a caller can own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceDomain {
    BankingAccount,
    EnergyAccount,
    EnergyServicePoint,
    BankingPayee,
}

/// The authenticated customer behind a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CallerIdentity {
    #[serde(alias = "accountsBanking")]
    pub banking_accounts: HashSet<String>,

    #[serde(alias = "accountsEnergy")]
    pub energy_accounts: HashSet<String>,

    #[serde(alias = "energyServicePoints")]
    pub energy_service_points: HashSet<String>,

    #[serde(alias = "bankingPayees")]
    pub banking_payees: HashSet<String>,

    /// Scopes granted to this caller.
    #[serde(alias = "scopes_supported")]
    pub scopes: Vec<String>,
}

impl CallerIdentity {
    pub fn owned(&self, domain: ResourceDomain) -> &HashSet<String> {
        match domain {
            ResourceDomain::BankingAccount => &self.banking_accounts,
            ResourceDomain::EnergyAccount => &self.energy_accounts,
            ResourceDomain::EnergyServicePoint => &self.energy_service_points,
            ResourceDomain::BankingPayee => &self.banking_payees,
        }
    }

    pub fn owns(&self, domain: ResourceDomain, id: &str) -> bool {
        self.owned(domain).contains(id)
    }

    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }

    pub fn with_owned<I, S>(mut self, domain: ResourceDomain, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = match domain {
            ResourceDomain::BankingAccount => &mut self.banking_accounts,
            ResourceDomain::EnergyAccount => &mut self.energy_accounts,
            ResourceDomain::EnergyServicePoint => &mut self.energy_service_points,
            ResourceDomain::BankingPayee => &mut self.banking_payees,
        };
        set.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes.extend(scopes.into_iter().map(Into::into));
        self
    }
}
