pub mod loaders;
pub mod order;
pub mod priority;
pub mod session_input;
pub mod worker;

pub use loaders::load_session_input;
pub use order::{Order, QueuedOrder, SkipCounter};
pub use priority::{priority_label, PriorityRules};
pub use session_input::{SessionInput, WorkerFlags};
pub use worker::{CountRecord, FairnessScores, HistoryLedger, Roster, WorkerId, WorkerStatus};
