//! # Board Store
//!
//! Holds the current [`BoardState`] and serializes every change through
//! [`BoardStore::apply`]. Each successful commit is published to subscribers
//! as a [`CommitNotice`] over an `mpsc` channel, which is how the effect side
//! learns something changed. Nothing polls the state.
//!
//! ```text
//! MoveRequest → apply() → update() → commit → CommitNotice ─┐
//!                                                           ▼
//!                                                 EffectDispatcher
//! ```
//!
//! Failed requests and no-op moves publish nothing.

use std::sync::mpsc::{self, Receiver, Sender};

use log::{debug, info, warn};

use crate::core::action::{MoveRequest, update};
use crate::core::error::BoardError;
use crate::core::outcome::Operation;
use crate::core::state::BoardState;

/// Published after every commit. `state` is the committed snapshot, whose
/// `last_operation` carries `revision`.
#[derive(Debug, Clone)]
pub struct CommitNotice {
    pub revision: u64,
    pub state: BoardState,
}

pub struct BoardStore {
    state: BoardState,
    subscribers: Vec<Sender<CommitNotice>>,
}

impl BoardStore {
    pub fn new(state: BoardState) -> Self {
        info!(
            "Board store created with {} container(s), {} item(s)",
            state.container_count(),
            state.item_count()
        );
        Self {
            state,
            subscribers: Vec::new(),
        }
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// Opens a new commit channel. Notices are only sent for commits made
    /// after subscribing.
    pub fn subscribe(&mut self) -> Receiver<CommitNotice> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Applies a request. Returns the committed operation, or `None` when the
    /// request was a no-op. On error the state is unchanged.
    pub fn apply(&mut self, request: &MoveRequest) -> Result<Option<Operation>, BoardError> {
        debug!("Applying {:?}", request);
        let transition = update(&self.state, request).inspect_err(|e| {
            warn!("Rejected {:?}: {}", request, e);
        })?;

        let Some((state, operation)) = transition else {
            return Ok(None);
        };
        self.state = state;
        self.publish(operation.revision);
        Ok(Some(operation))
    }

    fn publish(&mut self, revision: u64) {
        let notice = CommitNotice {
            revision,
            state: self.state.clone(),
        };
        // Drop subscribers whose receiver is gone
        self.subscribers
            .retain(|subscriber| subscriber.send(notice.clone()).is_ok());
        debug!(
            "Published revision {} to {} subscriber(s)",
            revision,
            self.subscribers.len()
        );
    }
}
