//! # Shell - Text Presentation Layer
//!
//! Line-oriented front end for the seeding tool: [`parser`] turns input lines into
//! [`ShellCommand`]s, [`session`] executes them against the state container and
//! [`render`] draws the views.
//!
//! [`run`] drives an interactive loop over any async reader and writer and saves a
//! snapshot after every command that changed state.

pub mod parser;
pub mod render;
pub mod session;

pub use parser::{CommandParser, ImageArg, ShellCommand, StarchArgs};
pub use session::Session;

use crate::storage::Storage;
use anyhow::Result;
use log::{error, info};
use std::cell::Cell;
use std::rc::Rc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

const PROMPT: &str = "starch> ";

/// Mark-dirty flag fed by a state subscription.
#[derive(Debug, Clone, Default)]
pub struct DirtyFlag(Rc<Cell<bool>>);

impl DirtyFlag {
    /// Subscribe a new flag to `session`'s state.
    pub fn watch(session: &mut Session) -> Self {
        let flag = DirtyFlag::default();
        let sink = flag.0.clone();
        session.state_mut().subscribe(move |_| sink.set(true));
        flag
    }

    /// Read and reset.
    pub fn take(&self) -> bool {
        self.0.replace(false)
    }
}

/// Interactive loop: prompt, parse, execute, persist. Ends on QUIT or end of input.
pub async fn run<R, W>(session: &mut Session, storage: &Storage, input: R, mut output: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let parser = CommandParser::new();
    let dirty = DirtyFlag::watch(session);
    let mut lines = input.lines();

    output
        .write_all(render::current_view(session.state(), session.selection().state()).as_bytes())
        .await?;
    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let reply = match session.execute(parser.parse(&line)).await {
            Ok(reply) => reply,
            Err(e) => {
                error!("Command failed: {}", e);
                format!("Error: {}\n", e)
            }
        };
        output.write_all(reply.as_bytes()).await?;
        if dirty.take() {
            if let Err(e) = storage.save_snapshot(&session.state().snapshot()).await {
                error!("Failed to save snapshot: {}", e);
                output
                    .write_all(format!("Warning: changes not saved ({})\n", e).as_bytes())
                    .await?;
            }
        }
        if session.is_finished() {
            break;
        }
    }
    output.flush().await?;
    info!("Shell session ended");
    Ok(())
}
