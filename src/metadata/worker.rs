use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::error::ReadError;
use crate::tags::TagRecord;

use super::TagReader;

/// Identifies the selection state a read was issued for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ReadTicket(u64);

impl ReadTicket {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct ReadRequest {
    pub ticket: ReadTicket,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ReadOutcome {
    pub ticket: ReadTicket,
    pub path: PathBuf,
    pub result: Result<TagRecord, ReadError>,
}

/// Spawn the reader thread. It answers every request on `outcomes`, in order,
/// and exits once either channel is closed.
pub fn spawn_reader<R>(
    reader: R,
    requests: Receiver<ReadRequest>,
    outcomes: Sender<ReadOutcome>,
) -> JoinHandle<()>
where
    R: TagReader + Send + 'static,
{
    thread::spawn(move || {
        for ReadRequest { ticket, path } in requests {
            debug!(ticket = ticket.id(), path = %path.display(), "reading tags");
            let result = reader.read(&path);
            if let Err(e) = &result {
                warn!(ticket = ticket.id(), "read failed: {e}");
            }
            if outcomes
                .send(ReadOutcome {
                    ticket,
                    path,
                    result,
                })
                .is_err()
            {
                break;
            }
        }
        debug!("reader thread exiting");
    })
}
