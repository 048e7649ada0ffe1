//! Interactive demo shell for trellis command trees.
//!
//! Builds a small fleet-themed command tree, then reads lines from stdin
//! and routes them. Lines starting with `complete ` print tab-completion
//! candidates for the rest of the line instead of executing it. Permissions
//! are granted up front via `--grant`, so denied paths are easy to poke at:
//!
//! ```text
//! trellis-repl --sender alice --grant fleet.admin
//! ```

use std::collections::HashSet;
use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use trellis::{
    Command, CommandBuilder, CommandContext, CommandName, CommandRegistry, CommandResult,
};

/// Interactive shell exercising a demo command tree.
#[derive(Parser, Debug)]
#[command(name = "trellis-repl", version, about)]
struct Cli {
    /// Display name of the invoking principal.
    #[arg(long, default_value = "operator")]
    sender: String,

    /// Grant a permission to the principal (repeatable).
    #[arg(long = "grant", value_name = "PERMISSION")]
    grants: Vec<String>,
}

/// Context backing every invocation in the shell: a fixed sender with a
/// fixed permission set, messaging straight to stdout.
struct ReplContext {
    sender: String,
    granted: HashSet<String>,
}

impl ReplContext {
    fn new(sender: String, grants: Vec<String>) -> Self {
        Self {
            sender,
            granted: grants.into_iter().collect(),
        }
    }
}

impl CommandContext<String> for ReplContext {
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
        println!("{text}");
    }
}

/// Message table standing in for a host's translation layer.
fn translate(key: &str) -> &'static str {
    match key {
        "error.permission" => "you do not have permission to do that",
        "error.usage" => "usage",
        "error.runtime" => "the command failed while running",
        _ => "unexpected result",
    }
}

fn sample_registry() -> CommandRegistry<String> {
    let status = CommandBuilder::new(CommandName::new("repl", "status"))
        .usage("<command>")
        .description("Prints the state of every agent.")
        .aliases(["st"])
        .executor(
            |ctx: &dyn CommandContext<String>,
             _cmd: &Command<String>,
             _label: &str,
             _args: &[String]| {
                ctx.send_message("all agents nominal");
                CommandResult::Success
            },
        )
        .build();

    let start = CommandBuilder::new(CommandName::new("repl", "start"))
        .usage("<command> <agent>")
        .description("Starts the named agent.")
        .executor(
            |ctx: &dyn CommandContext<String>,
             _cmd: &Command<String>,
             _label: &str,
             args: &[String]| {
                match args.first() {
                    Some(agent) => {
                        ctx.send_message(&format!("starting agent '{agent}'"));
                        CommandResult::Success
                    }
                    None => CommandResult::UsageError,
                }
            },
        )
        .build();

    let stop = CommandBuilder::new(CommandName::new("repl", "stop"))
        .usage("<command> <agent>")
        .description("Stops the named agent.")
        .permission("fleet.admin")
        .executor(
            |ctx: &dyn CommandContext<String>,
             _cmd: &Command<String>,
             _label: &str,
             args: &[String]| {
                match args.first() {
                    Some(agent) => {
                        ctx.send_message(&format!("stopping agent '{agent}'"));
                        CommandResult::Success
                    }
                    None => CommandResult::UsageError,
                }
            },
        )
        .build();

    let agent = CommandBuilder::new(CommandName::new("repl", "agent"))
        .usage("<command> <start|stop> <agent>")
        .description("Starts and stops fleet agents.")
        .child(start)
        .child(stop)
        .executor(
            |_ctx: &dyn CommandContext<String>,
             _cmd: &Command<String>,
             _label: &str,
             _args: &[String]| CommandResult::UsageError,
        )
        .build();

    let fleet = CommandBuilder::new(CommandName::new("repl", "fleet"))
        .usage("<command> <status|agent>")
        .description("Top-level fleet controls.")
        .aliases(["fl"])
        .child(status)
        .child(agent)
        .executor(
            |ctx: &dyn CommandContext<String>,
             _cmd: &Command<String>,
             _label: &str,
             args: &[String]| {
                if args.is_empty() {
                    ctx.send_message("fleet commands: status (st), agent start|stop");
                    CommandResult::Success
                } else {
                    // An unrecognized sub-command reads as a usage problem.
                    CommandResult::UsageError
                }
            },
        )
        .build();

    let echo = CommandBuilder::new(CommandName::new("repl", "echo"))
        .usage("<command> <text>...")
        .description("Repeats its arguments back.")
        .aliases(["say"])
        .executor(
            |ctx: &dyn CommandContext<String>,
             _cmd: &Command<String>,
             _label: &str,
             args: &[String]| {
                if args.is_empty() {
                    CommandResult::UsageError
                } else {
                    ctx.send_message(&args.join(" "));
                    CommandResult::Success
                }
            },
        )
        .completer(
            |_ctx: &dyn CommandContext<String>,
             _cmd: &Command<String>,
             _label: &str,
             args: &[String]| {
                let partial = args.last().map(String::as_str).unwrap_or("");
                ["hello", "world"]
                    .iter()
                    .filter(|word| word.starts_with(partial))
                    .map(|word| word.to_string())
                    .collect()
            },
        )
        .build();

    let mut registry = CommandRegistry::new();
    registry.register(fleet);
    registry.register(echo);
    registry
}

fn dispatch(registry: &CommandRegistry<String>, ctx: &ReplContext, line: &str) {
    let tokens: Vec<String> = line.split_whitespace().map(str::to_string).collect();
    let Some((label, args)) = tokens.split_first() else {
        return;
    };
    let Some(command) = registry.find(label) else {
        println!("unknown command '{label}'");
        return;
    };

    let (result, usage) = command.route(ctx, label, args);
    match result {
        CommandResult::Success => {}
        CommandResult::UsageError => {
            if let Some(usage) = usage {
                println!("{}: {usage}", translate("error.usage"));
            }
        }
        other => {
            if let Some(key) = other.message_key() {
                println!("{}", translate(key));
            }
        }
    }
}

fn run_completion(registry: &CommandRegistry<String>, ctx: &ReplContext, rest: &str) {
    let mut tokens: Vec<String> = rest.split_whitespace().map(str::to_string).collect();
    if rest.ends_with(char::is_whitespace) || tokens.is_empty() {
        // The cursor sits on a fresh, still-empty token.
        tokens.push(String::new());
    }
    let Some((label, args)) = tokens.split_first() else {
        return;
    };

    if args.is_empty() {
        // Still typing the root label itself.
        let roots: Vec<String> = registry
            .list()
            .iter()
            .map(|command| command.name().name().to_string())
            .filter(|segment| segment.starts_with(label.as_str()))
            .collect();
        print_candidates(&roots);
        return;
    }

    match registry.find(label) {
        Some(command) => print_candidates(&command.complete(ctx, label, args)),
        None => println!("(no matches)"),
    }
}

fn print_candidates(candidates: &[String]) {
    if candidates.is_empty() {
        println!("(no matches)");
    } else {
        println!("{}", candidates.join("  "));
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let ctx = ReplContext::new(cli.sender, cli.grants);
    let registry = sample_registry();
    tracing::debug!(
        commands = registry.len(),
        sender = %ctx.sender_name(),
        "demo registry ready"
    );

    println!("trellis demo shell -- try 'fleet status', 'complete fleet ', or 'quit'");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed == "exit" || trimmed == "quit" {
            break;
        }
        // Trailing whitespace is significant to completion (it marks a
        // fresh token), so only the left side is trimmed here.
        if let Some(rest) = line.trim_start().strip_prefix("complete ") {
            run_completion(&registry, &ctx, rest);
            continue;
        }
        dispatch(&registry, &ctx, trimmed);
    }

    Ok(())
}
