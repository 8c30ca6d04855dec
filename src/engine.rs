//! Scan engine.
//!
//! This module is the operational core of the scanner. It is split into
//! focused submodules under `src/engine/` while keeping public paths stable:
//!
//! ```text
//! add_rule/add_state ──▶ RuleTable::add            (rule_table.rs)
//!                               │
//! lex() ─────────────▶ Driver::scan_one ───────────┐ (driver.rs)
//!                               │                  │
//!                               ▼                  │
//!                      Selector::select ◀───────────┘ (selector.rs)
//!                               │
//!                               ▼
//!                      user action (via Scanner's action API)
//! ```
//!
//! - `rule_table.rs`: owns the per-state ordered rule lists and the
//!   scanner-global registration-index counter.
//! - `selector.rs`: the longest-match-with-tie-break algorithm (§4.3 of
//!   `SPEC_FULL.md`).
//! - `driver.rs`: the single-pass protocol that ties selection, the action
//!   invocation, and EOF/reject bookkeeping together (§4.4).

#[path = "engine/driver.rs"]
mod driver;
#[path = "engine/rule_table.rs"]
mod rule_table;
#[path = "engine/selector.rs"]
mod selector;

pub(crate) use driver::{DriverOutcome, run_pass};
pub(crate) use rule_table::RuleTable;
