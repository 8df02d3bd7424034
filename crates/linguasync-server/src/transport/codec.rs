//! Decode-once codec for the transport layer.
//!
//! - Text frames => `Inbound` (UTF-8 + JSON + tag validation in one step)
//! - Ping/Pong/Close are surfaced for lifecycle management
//! - Binary frames have no meaning in this protocol and are surfaced so the
//!   session can log and drop them

use axum::extract::ws::Message;

use linguasync_core::error::Result;
use linguasync_core::protocol::Inbound;

#[derive(Debug)]
pub enum Frame {
    Inbound(Inbound),
    Ping(Vec<u8>),
    Pong,
    Close,
    Unsupported,
}

pub fn decode(msg: Message) -> Result<Frame> {
    match msg {
        Message::Text(s) => Ok(Frame::Inbound(Inbound::decode(&s)?)),
        Message::Binary(_) => Ok(Frame::Unsupported),
        Message::Ping(v) => Ok(Frame::Ping(v)),
        Message::Pong(_) => Ok(Frame::Pong),
        Message::Close(_) => Ok(Frame::Close),
    }
}
