//! Socket readiness flags

use bitflags::bitflags;

bitflags! {
    /// Readiness reported to pollers.
    ///
    /// - `IN`: a receive would yield a message
    /// - `OUT`: a send would be accepted
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SocketEvents: u8 {
        const IN = 1 << 0;
        const OUT = 1 << 1;
    }
}
