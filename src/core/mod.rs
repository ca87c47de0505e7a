pub mod driver;
pub mod event;
pub mod observer;
pub mod snapshot;
pub mod state;

pub use driver::SchedCore;
pub use event::{TickEvent, TickTrace};
pub use snapshot::Snapshot;
pub use state::{Executed, Process, ProcessId, SchedState, Ticks};
