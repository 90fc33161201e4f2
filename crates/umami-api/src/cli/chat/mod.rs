//! Interactive terminal chat client.
//!
//! Talks to a running `umami serve` over `/api/chat`, printing fragments as
//! they stream in. Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
