pub mod observer;
pub mod sink;

pub use observer::{NpcRegistry, WorldObserver};
pub use sink::ActionSink;
