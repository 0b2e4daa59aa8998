//! Dispatcher: routes `(operation name, args)` to exactly one asset service handler.
//!
//! Operation names are parsed into a closed [`Operation`] enum at the boundary; anything
//! outside the fixed set is rejected before a handler runs.

use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::core::payload::Payload;
use crate::core::response::Response;
use crate::core::service::AssetService;
use crate::core::store::LedgerStore;
use crate::error::{LedgerError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    QueryAsset,
    InitLedger,
    RecordAsset,
    QueryAllAsset,
    ChangeAssetHolder,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::QueryAsset,
        Operation::InitLedger,
        Operation::RecordAsset,
        Operation::QueryAllAsset,
        Operation::ChangeAssetHolder,
    ];

    /// Wire name of the operation.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::QueryAsset => "queryAsset",
            Operation::InitLedger => "initLedger",
            Operation::RecordAsset => "recordAsset",
            Operation::QueryAllAsset => "queryAllAsset",
            Operation::ChangeAssetHolder => "changeAssetHolder",
        }
    }

    /// Whether a successful call writes to the ledger.
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Operation::InitLedger | Operation::RecordAsset | Operation::ChangeAssetHolder
        )
    }
}

impl FromStr for Operation {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| LedgerError::UnknownOperation(s.to_string()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One call as delivered by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub function: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, A>(function: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            function: function.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug)]
pub struct Dispatcher<S> {
    service: AssetService<S>,
}

impl<S: LedgerStore> Dispatcher<S> {
    pub fn new(service: AssetService<S>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &AssetService<S> {
        &self.service
    }

    /// Instantiation hook. Does no ledger work; seeding is a separate `initLedger` call.
    pub fn init(&self) -> Response {
        Response::success(Payload::empty())
    }

    /// Resolves the name and runs the matching handler once.
    pub fn call(&self, function: &str, args: &[String]) -> Result<Payload> {
        let op: Operation = function.parse()?;
        self.run(op, args)
    }

    pub fn run(&self, op: Operation, args: &[String]) -> Result<Payload> {
        debug!(operation = %op, args = args.len(), "dispatch");
        let result = match op {
            Operation::QueryAsset => self.service.query_asset(args),
            Operation::InitLedger => self.service.init_ledger(args),
            Operation::RecordAsset => self.service.record_asset(args),
            Operation::QueryAllAsset => self.service.query_all_asset(args),
            Operation::ChangeAssetHolder => self.service.change_asset_holder(args),
        };
        if result.is_ok() && op.is_write() {
            info!(operation = %op, "ledger updated");
        }
        result
    }

    /// Transport entry point: every failure becomes an error response with its message.
    pub fn invoke(&self, invocation: &Invocation) -> Response {
        let result = self.call(&invocation.function, &invocation.args);
        if let Err(e) = &result {
            warn!(function = %invocation.function, error = %e, "invocation failed");
        }
        Response::from(result)
    }
}
