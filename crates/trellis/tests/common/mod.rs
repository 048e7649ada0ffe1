//! Shared helpers for trellis integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use trellis::{
    Command, CommandBuilder, CommandContext, CommandName, CommandResult, Executor, TabCompleter,
};

/// Test context with a fixed sender and permission set; records every
/// message sent back through it.
pub struct TestContext {
    sender: String,
    granted: HashSet<String>,
    messages: Mutex<Vec<String>>,
}

impl TestContext {
    pub fn new(sender: &str) -> Self {
        Self::with_permissions(sender, &[])
    }

    pub fn with_permissions(sender: &str, permissions: &[&str]) -> Self {
        Self {
            sender: sender.to_string(),
            granted: permissions.iter().map(|p| p.to_string()).collect(),
            messages: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl CommandContext<String> for TestContext {
    fn sender(&self) -> &String {
        &self.sender
    }

    fn sender_name(&self) -> String {
        self.sender.clone()
    }

    fn has_permission(&self, permission: &str) -> bool {
        self.granted.contains(permission)
    }

    fn send_message(&self, text: &str) {
        self.messages.lock().unwrap().push(text.to_string());
    }
}

/// Executor returning a fixed result and counting invocations.
pub struct SpyExecutor {
    result: CommandResult,
    calls: Arc<AtomicUsize>,
}

impl SpyExecutor {
    pub fn new(result: CommandResult) -> Self {
        Self {
            result,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared call counter; grab a handle before the spy moves into a
    /// command.
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl Executor<String> for SpyExecutor {
    fn execute(
        &self,
        _ctx: &dyn CommandContext<String>,
        _command: &Command<String>,
        _label: &str,
        _args: &[String],
    ) -> CommandResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result
    }
}

/// Executor recording the label and args of every invocation.
pub struct RecordingExecutor {
    result: CommandResult,
    invocations: Arc<Mutex<Vec<(String, Vec<String>)>>>,
}

impl RecordingExecutor {
    pub fn new(result: CommandResult) -> Self {
        Self {
            result,
            invocations: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn invocations(&self) -> Arc<Mutex<Vec<(String, Vec<String>)>>> {
        Arc::clone(&self.invocations)
    }
}

impl Executor<String> for RecordingExecutor {
    fn execute(
        &self,
        _ctx: &dyn CommandContext<String>,
        _command: &Command<String>,
        label: &str,
        args: &[String],
    ) -> CommandResult {
        self.invocations
            .lock()
            .unwrap()
            .push((label.to_string(), args.to_vec()));
        self.result
    }
}

/// Completer returning a fixed candidate list and recording the label and
/// args it was asked about.
pub struct RecordingCompleter {
    candidates: Vec<String>,
    requests: Arc<Mutex<Vec<(String, Vec<String>)>>>,
}

impl RecordingCompleter {
    pub fn new(candidates: &[&str]) -> Self {
        Self {
            candidates: candidates.iter().map(|c| c.to_string()).collect(),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requests(&self) -> Arc<Mutex<Vec<(String, Vec<String>)>>> {
        Arc::clone(&self.requests)
    }
}

impl TabCompleter<String> for RecordingCompleter {
    fn complete(
        &self,
        _ctx: &dyn CommandContext<String>,
        _command: &Command<String>,
        label: &str,
        args: &[String],
    ) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .push((label.to_string(), args.to_vec()));
        self.candidates.clone()
    }
}

pub fn name(name: &str) -> CommandName {
    CommandName::new("test", name)
}

pub fn args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

/// Command with the given usage text and a spy executor returning `result`;
/// hands back the command and the spy's call counter.
pub fn spy_command(
    segment: &str,
    usage: &str,
    result: CommandResult,
) -> (Command<String>, Arc<AtomicUsize>) {
    let spy = SpyExecutor::new(result);
    let counter = spy.counter();
    let command = CommandBuilder::new(name(segment))
        .usage(usage)
        .executor(spy)
        .build();
    (command, counter)
}
