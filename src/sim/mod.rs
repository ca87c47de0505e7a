pub mod driver;
pub mod workload;

pub use driver::{RunError, Sim};
pub use workload::ProcessSpec;
