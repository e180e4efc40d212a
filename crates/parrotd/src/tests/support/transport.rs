//! Scripted chat sessions for supervision tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use parrot_irc::OutboundLine;

use crate::process::ShutdownFlag;
use crate::transport::{ChatTransport, Connector, TransportError};

/// One scripted poll result.
pub enum Poll {
    Lines(Vec<String>),
    Fail(TransportError),
}

impl Poll {
    /// A poll yielding `lines` in order.
    #[must_use]
    pub fn lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Lines(lines.into_iter().map(Into::into).collect())
    }
}

/// Transport replaying scripted polls.
///
/// Once the script runs out the transport raises the shutdown flag and keeps
/// returning empty polls.
pub struct ScriptedTransport {
    polls: VecDeque<Poll>,
    sent: Arc<Mutex<Vec<String>>>,
    shutdown: ShutdownFlag,
}

impl ChatTransport for ScriptedTransport {
    fn poll_lines(&mut self) -> Result<Vec<String>, TransportError> {
        match self.polls.pop_front() {
            Some(Poll::Lines(lines)) => Ok(lines),
            Some(Poll::Fail(error)) => Err(error),
            None => {
                self.shutdown.trigger();
                Ok(Vec::new())
            }
        }
    }

    fn send_line(&mut self, line: &OutboundLine) -> Result<(), TransportError> {
        self.sent
            .lock()
            .expect("sent lines mutex poisoned")
            .push(line.to_string());
        Ok(())
    }
}

/// Connector handing out one scripted session per call.
///
/// Each entry is either a session script or a connect failure. When every
/// entry is used up the shutdown flag is raised.
pub struct ScriptedConnector {
    sessions: VecDeque<Result<Vec<Poll>, TransportError>>,
    sent: Arc<Mutex<Vec<String>>>,
    shutdown: ShutdownFlag,
    connects: usize,
}

impl ScriptedConnector {
    #[must_use]
    pub fn new(shutdown: ShutdownFlag) -> Self {
        Self {
            sessions: VecDeque::new(),
            sent: Arc::new(Mutex::new(Vec::new())),
            shutdown,
            connects: 0,
        }
    }

    #[must_use]
    pub fn session(mut self, polls: Vec<Poll>) -> Self {
        self.sessions.push_back(Ok(polls));
        self
    }

    #[must_use]
    pub fn refuse(mut self, error: TransportError) -> Self {
        self.sessions.push_back(Err(error));
        self
    }

    /// Every line written across all sessions.
    #[must_use]
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().expect("sent lines mutex poisoned").clone()
    }

    #[must_use]
    pub fn connects(&self) -> usize {
        self.connects
    }
}

impl Connector for ScriptedConnector {
    type Transport = ScriptedTransport;

    fn connect(&mut self) -> Result<Self::Transport, TransportError> {
        self.connects += 1;
        let Some(next) = self.sessions.pop_front() else {
            self.shutdown.trigger();
            return Err(TransportError::Closed);
        };
        let polls = next?;
        Ok(ScriptedTransport {
            polls: polls.into(),
            sent: Arc::clone(&self.sent),
            shutdown: self.shutdown.clone(),
        })
    }
}
