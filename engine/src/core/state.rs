/// Enumeration of possible states the engine can be in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum State {
    /// The engine has never been booted
    Dead,
    /// Boot scenes are loading
    Starting,
    /// The engine is running in normal operation
    Running,
    /// The world is shutting down
    Stopping,
    /// The engine has stopped
    Stopped,
}
