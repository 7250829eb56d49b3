// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Common types shared by the respondent socket and its engines

pub mod error;
pub mod events;
pub mod message;
pub mod socket_type;

pub use error::{TransportError, TransportResult};
pub use events::SocketEvents;
pub use message::{Message, PipeId};
pub use socket_type::SocketType;
