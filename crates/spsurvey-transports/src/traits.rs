// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Trait definitions at the two seams of a socket
//!
//! - [`DistributionEngine`]: the many-to-many pipe layer underneath a socket.
//!   It fans surveys in from peers and carries replies back out.
//! - [`SocketBase`]: what the surrounding socket framework calls. Every socket
//!   type implements it, so a framework can hold `Box<dyn SocketBase<Pipe = P>>`.

use crate::common::{Message, PipeId, SocketEvents, SocketType, TransportResult};

/// Result of handing a message to the engine for delivery
#[derive(Debug, PartialEq, Eq)]
#[must_use]
pub enum SendOutcome {
    /// The engine took ownership of the message
    Accepted,
    /// No capacity right now; the message is handed back untouched
    WouldBlock(Message),
}

/// Non-blocking pipe distribution layer
///
/// Messages crossing this boundary carry the protocol header. Implementations
/// never block: `recv` returns `None` and `send` returns
/// [`SendOutcome::WouldBlock`] when they cannot proceed.
pub trait DistributionEngine: Send {
    /// Engine-specific handle for one peer connection
    type Pipe;

    /// Attach a peer connection
    fn add_pipe(&mut self, pipe: Self::Pipe) -> TransportResult<()>;

    /// Detach a peer connection, returning it if it was attached
    fn remove_pipe(&mut self, id: PipeId) -> Option<Self::Pipe>;

    /// Take the next inbound message, fair-queued across pipes
    fn recv(&mut self) -> Option<Message>;

    /// Offer a message for delivery
    fn send(&mut self, msg: Message) -> SendOutcome;

    /// Current raw readiness
    fn events(&self) -> SocketEvents;
}

/// Socket-type behaviour invoked by the surrounding framework
pub trait SocketBase: Send {
    type Pipe;

    fn socket_type(&self) -> SocketType;

    fn add_pipe(&mut self, pipe: Self::Pipe) -> TransportResult<()>;

    fn remove_pipe(&mut self, id: PipeId) -> Option<Self::Pipe>;

    /// Readiness as this socket type wants it reported to pollers
    fn events(&self) -> SocketEvents;

    /// Send an application message
    ///
    /// # Panics
    ///
    /// Implementations that frame messages themselves may panic if `msg`
    /// already carries a protocol header.
    fn send(&mut self, msg: Message) -> TransportResult<()>;

    fn recv(&mut self) -> TransportResult<Message>;

    /// Set the application-visible header of `msg`
    fn set_header(&self, msg: &mut Message, header: &[u8]) -> TransportResult<()>;

    /// Read the application-visible header of `msg`
    fn get_header<'a>(&self, msg: &'a Message) -> &'a [u8];
}
