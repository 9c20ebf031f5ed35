pub mod assignment_flow;
pub mod session_ledger;

pub use assignment_flow::{AssignmentFlow, ParsedInput, Plan};
pub use session_ledger::{DisplayRow, SessionLedger};
