//! Smoke-check scenario
//!
//! Runs a fixed, ordered list of checks against the posts collection.
//! Checks share nothing but the client and the fixture values, so any
//! one of them can also run on its own.

mod checks;
pub mod expect;
mod report;
mod runner;

use std::fmt;

pub use checks::CheckContext;
pub use report::{ConsoleReporter, LogReporter, Reporter};
pub use runner::{run_check, run_checks, CheckFailure, RunReport};

/// One named check routine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Check {
    /// GET the collection and inspect the first post
    List,
    /// GET one post by id
    GetOne,
    /// POST a new post
    Create,
    /// PUT a full record
    Replace,
    /// PATCH only the body
    PartialUpdate,
    /// DELETE a post and confirm it is gone
    Delete,
}

impl Check {
    /// Every check in run order
    pub const ALL: [Check; 6] = [
        Check::List,
        Check::GetOne,
        Check::Create,
        Check::Replace,
        Check::PartialUpdate,
        Check::Delete,
    ];

    /// Name used on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Check::List => "list",
            Check::GetOne => "get-one",
            Check::Create => "create",
            Check::Replace => "replace",
            Check::PartialUpdate => "partial-update",
            Check::Delete => "delete",
        }
    }

    /// 1-based position in the full run order
    pub fn number(&self) -> usize {
        Check::ALL.iter().position(|c| c == self).unwrap_or(0) + 1
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    #[test]
    fn test_run_order_numbers() {
        assert_eq!(Check::List.number(), 1);
        assert_eq!(Check::PartialUpdate.number(), 5);
        assert_eq!(Check::Delete.number(), 6);
    }

    #[test]
    fn test_cli_names_match_display() {
        for check in Check::ALL {
            let parsed = Check::from_str(check.name(), false).unwrap();
            assert_eq!(parsed, check);
        }
    }
}
