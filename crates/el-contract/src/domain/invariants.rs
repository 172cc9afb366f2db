//! # Domain Invariants
//!
//! Checks over the write set an invocation staged. The runtime runs them
//! before committing; a violation means the write set must be discarded.
//!
//! | Invariant | Check |
//! |-----------|-------|
//! | Failed invocations stage nothing | `check_failure_rollback_invariant()` |
//! | Queries never write | `check_read_only_invariant()` |
//! | Transfers write both entities or neither | `check_paired_write_invariant()` |
//! | Initialize writes once per entity | `check_initialize_count_invariant()` |
//! | Delete removes exactly one key | `check_single_delete_invariant()` |

use crate::domain::entities::{Response, StateChange};
use crate::domain::operation::Operation;

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// A failed invocation leaves an empty write set.
#[must_use]
pub fn check_failure_rollback_invariant(response: &Response, changes: &[StateChange]) -> bool {
    response.is_success() || changes.is_empty()
}

/// Read-only operations stage no changes.
#[must_use]
pub fn check_read_only_invariant(operation: Operation, changes: &[StateChange]) -> bool {
    !operation.is_read_only() || changes.is_empty()
}

/// A successful transfer stages two puts on distinct keys, or nothing
/// (self-transfer).
#[must_use]
pub fn check_paired_write_invariant(operation: Operation, changes: &[StateChange]) -> bool {
    if !matches!(operation, Operation::Transfer | Operation::TransferBalance) {
        return true;
    }
    match changes {
        [] => true,
        [first, second] => first.is_put() && second.is_put() && first.key() != second.key(),
        _ => false,
    }
}

/// A successful Initialize stages exactly one put per schema entity.
#[must_use]
pub fn check_initialize_count_invariant(
    operation: Operation,
    entity_count: usize,
    changes: &[StateChange],
) -> bool {
    operation != Operation::Initialize
        || (changes.len() == entity_count && changes.iter().all(StateChange::is_put))
}

/// A successful Delete stages exactly one delete.
#[must_use]
pub fn check_single_delete_invariant(operation: Operation, changes: &[StateChange]) -> bool {
    operation != Operation::Delete || matches!(changes, [StateChange::Delete { .. }])
}

/// Check all invariants at once.
///
/// `entity_count` is the configured Initialize schema length.
#[must_use]
pub fn check_all_invariants(
    operation: Operation,
    entity_count: usize,
    response: &Response,
    changes: &[StateChange],
) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_failure_rollback_invariant(response, changes) {
        violations.push(InvariantViolation::WritesOnFailure {
            changes: changes.len(),
        });
    }

    if response.is_success() {
        if !check_read_only_invariant(operation, changes) {
            violations.push(InvariantViolation::ReadOnlyWrite { operation });
        }
        if !check_paired_write_invariant(operation, changes) {
            violations.push(InvariantViolation::UnpairedTransfer {
                changes: changes.len(),
            });
        }
        if !check_initialize_count_invariant(operation, entity_count, changes) {
            violations.push(InvariantViolation::InitializeCount {
                expected: entity_count,
                actual: changes.len(),
            });
        }
        if !check_single_delete_invariant(operation, changes) {
            violations.push(InvariantViolation::DeleteCount {
                actual: changes.len(),
            });
        }
    }

    if violations.is_empty() {
        InvariantCheckResult::Valid
    } else {
        InvariantCheckResult::Invalid(violations)
    }
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Result of checking all invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Specific invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A failed invocation staged changes.
    WritesOnFailure {
        /// Number of staged changes.
        changes: usize,
    },
    /// A read-only operation staged changes.
    ReadOnlyWrite {
        /// Operation that wrote.
        operation: Operation,
    },
    /// A transfer staged something other than a distinct pair of puts.
    UnpairedTransfer {
        /// Number of staged changes.
        changes: usize,
    },
    /// Initialize staged the wrong number of puts.
    InitializeCount {
        /// Configured entity count.
        expected: usize,
        /// Staged change count.
        actual: usize,
    },
    /// Delete staged the wrong number of deletes.
    DeleteCount {
        /// Staged change count.
        actual: usize,
    },
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WritesOnFailure { changes } => {
                write!(f, "failed invocation staged {changes} changes")
            }
            Self::ReadOnlyWrite { operation } => {
                write!(f, "read-only operation {operation} staged changes")
            }
            Self::UnpairedTransfer { changes } => {
                write!(f, "transfer staged {changes} changes, expecting 0 or 2 puts")
            }
            Self::InitializeCount { expected, actual } => {
                write!(f, "initialize staged {actual} puts, expecting {expected}")
            }
            Self::DeleteCount { actual } => {
                write!(f, "delete staged {actual} changes, expecting 1 delete")
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
