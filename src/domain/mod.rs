pub mod property;
pub mod risk;
pub mod status;

pub use property::PropertyRecord;
pub use risk::HazardKind;
pub use status::{LifecycleSignal, StatusInfo};
