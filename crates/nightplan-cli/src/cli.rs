//! Line-oriented shell over the application stores.
//!
//! Every input line is parsed with clap as if it were a command line of its
//! own, so the shell gets the same help and error messages as `np` itself:
//!
//! ```text
//! stdin line → ShellLine (clap) → core params → store → display type → renderer
//! ```
//!
//! Failed lookups and invalid input are printed and the session goes on;
//! only I/O errors on stdin end it early.

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{debug, warn};
use nightplan_core::{
    display::{FriendRequests, Invitations, OperationStatus, Threads},
    models::Direction,
    params::{NewFriendRequest, NewInvitation, SendMessage},
    App, FriendDecision, InvitationDecision, NightplanError, Participant, Plan, PlanProgress,
    PlanProgressStore,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::renderer::TerminalRenderer;

/// One shell input line.
#[derive(Parser)]
#[command(no_binary_name = true, name = "np")]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand)]
pub enum ShellCommand {
    /// Head out to the first stop
    Start,
    /// Check in at the current stop, or at stop number STOP
    #[command(alias = "ci")]
    Checkin { stop: Option<usize> },
    /// Leave the current stop
    Depart,
    /// Move on to the next stop, completing the night after the last one
    Next,
    /// End the night
    Complete,
    /// Mark a friend as on their way
    Friend {
        id: String,
        /// Remove the friend instead
        #[arg(long)]
        arrived: bool,
    },
    /// Send a message to a friend
    Send {
        to: String,
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Record a message received from a friend
    Receive {
        from: String,
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Mark a conversation read
    Read { thread: String },
    /// Mark every conversation read
    Readall,
    /// Pin or unpin a conversation
    Pin { thread: String },
    /// Search conversations by name or last message
    Search {
        #[arg(trailing_var_arg = true)]
        query: Vec<String>,
    },
    /// List conversations, pinned first
    Threads,
    /// Record an invitation from a friend to one of the loaded plans
    Invite { from: String, plan: String },
    /// Answer an invitation: accept, decline, maybe or cancel
    Respond {
        id: String,
        decision: InvitationDecision,
    },
    /// List invitations
    Invites,
    /// Record a friend request from someone
    Request { from: String },
    /// Accept a friend request
    Accept { id: String },
    /// Decline a friend request
    Decline { id: String },
    /// List friend requests
    Requests,
    /// Show the night's progress and unread counts
    Status,
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

enum Flow {
    Continue(String),
    Quit,
}

/// Executes shell commands against one [`App`].
pub struct Cli {
    app: App,
    plans: Vec<Plan>,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(app: App, plans: Vec<Plan>, renderer: TerminalRenderer) -> Self {
        Self {
            app,
            plans,
            renderer,
        }
    }

    /// Reads commands from `input` until `quit` or end of input.
    pub async fn run<R>(&self, input: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match self.execute_line(line) {
                Flow::Continue(output) => self.renderer.render(&output),
                Flow::Quit => break,
            }
        }
        Ok(())
    }

    fn execute_line(&self, line: &str) -> Flow {
        debug!("shell: {line}");
        let command = match ShellLine::try_parse_from(line.split_whitespace()) {
            Ok(parsed) => parsed.command,
            Err(e) => return Flow::Continue(e.render().to_string()),
        };
        match command {
            ShellCommand::Quit => Flow::Quit,
            command => Flow::Continue(self.execute(command).unwrap_or_else(|e| {
                warn!("{line}: {e}");
                format!("Error: {e}\n")
            })),
        }
    }

    fn execute(&self, command: ShellCommand) -> nightplan_core::Result<String> {
        let progress = &self.app.progress;
        let output = match command {
            ShellCommand::Start => self.transition("Night started", |store| store.start_night()),
            ShellCommand::Checkin { stop } => self.check_in(stop),
            ShellCommand::Depart => self.transition("Left the stop", |store| store.depart()),
            ShellCommand::Next => self.transition("Moved on", |store| store.move_to_next()),
            ShellCommand::Complete => {
                self.transition("Night completed", |store| store.complete())
            }
            ShellCommand::Friend { id, arrived: false } => {
                self.transition(&format!("{id} is on the way"), |store| {
                    store.add_friend_en_route(&id)
                })
            }
            ShellCommand::Friend { id, arrived: true } => {
                self.transition(&format!("{id} arrived"), |store| {
                    store.remove_friend_en_route(&id)
                })
            }
            ShellCommand::Send { to, text } => {
                let params = SendMessage::text(&to, &to, text.join(" "));
                params.validate()?;
                let message_id = self.app.messages.send(&params);
                OperationStatus::Done(format!("Sent {message_id} to {to}")).to_string()
            }
            ShellCommand::Receive { from, text } => {
                let params = SendMessage::text(&from, &from, text.join(" "));
                params.validate()?;
                let message_id = self.app.messages.receive(&params);
                OperationStatus::Done(format!("Received {message_id} from {from}")).to_string()
            }
            ShellCommand::Read { thread } => {
                self.app
                    .messages
                    .mark_thread_read(&thread)
                    .ok_or_else(|| NightplanError::ThreadNotFound { id: thread.clone() })?;
                OperationStatus::Done(format!("Marked {thread} read")).to_string()
            }
            ShellCommand::Readall => {
                self.app.messages.mark_all_read();
                OperationStatus::Done("All conversations read".to_string()).to_string()
            }
            ShellCommand::Pin { thread } => {
                let pinned = self
                    .app
                    .messages
                    .toggle_pin(&thread)
                    .ok_or_else(|| NightplanError::ThreadNotFound { id: thread.clone() })?;
                let verb = if pinned { "Pinned" } else { "Unpinned" };
                OperationStatus::Done(format!("{verb} {thread}")).to_string()
            }
            ShellCommand::Search { query } => {
                Threads(self.app.messages.search(&query.join(" "))).to_string()
            }
            ShellCommand::Threads => {
                Threads(self.app.messages.threads_pinned_first()).to_string()
            }
            ShellCommand::Invite { from, plan } => {
                let plan_name = self
                    .plans
                    .iter()
                    .find(|candidate| candidate.id == plan)
                    .map_or_else(|| plan.clone(), |found| found.name.clone());
                let params = NewInvitation {
                    plan_id: plan,
                    plan_name,
                    from: Participant::new(&from, &from),
                    message: None,
                };
                params.validate()?;
                let invitation = self.app.invitations.add(&params);
                OperationStatus::Done(format!("Invitation {} from {from}", invitation.id))
                    .to_string()
            }
            ShellCommand::Respond { id, decision } => {
                let invitation = self
                    .app
                    .invitations
                    .respond(&id, decision)
                    .ok_or_else(|| NightplanError::InvitationNotFound { id: id.clone() })?;
                OperationStatus::Done(format!("{id} is {}", invitation.status)).to_string()
            }
            ShellCommand::Invites => Invitations(self.app.invitations.items()).to_string(),
            ShellCommand::Request { from } => {
                let params = NewFriendRequest {
                    counterpart: Participant::new(&from, &from),
                    direction: Direction::Incoming,
                    mutual_friends: 0,
                };
                params.validate()?;
                let request = self.app.friend_requests.add(&params);
                OperationStatus::Done(format!("Friend request {} from {from}", request.id))
                    .to_string()
            }
            ShellCommand::Accept { id } => self.answer_friend(&id, FriendDecision::Accept)?,
            ShellCommand::Decline { id } => self.answer_friend(&id, FriendDecision::Decline)?,
            ShellCommand::Requests => {
                FriendRequests(self.app.friend_requests.items()).to_string()
            }
            ShellCommand::Status => format!(
                "{}\n## Inbox\n\n- Unread messages: {}\n- Unread invitations: {}\n- Unread friend requests: {}\n",
                progress.snapshot(),
                self.app.messages.unread_count(),
                self.app.invitations.unread_count(),
                self.app.friend_requests.unread_count(),
            ),
            ShellCommand::Quit => String::new(),
        };
        Ok(output)
    }

    /// Runs a progress transition and reports whether it changed anything.
    fn transition<F>(&self, done: &str, apply: F) -> String
    where
        F: FnOnce(&PlanProgressStore) -> PlanProgress,
    {
        let before = self.app.progress.snapshot();
        let after = apply(&self.app.progress);
        let status = if before.current_plan.is_none() {
            OperationStatus::NotFound("active plan".to_string())
        } else if before == after {
            OperationStatus::Unchanged(format!("Nothing to do: {}", after.stage.with_icon()))
        } else {
            OperationStatus::Done(done.to_string())
        };
        format!("{status}{after}")
    }

    /// `stop` is 1-based as shown in the progress display.
    fn check_in(&self, stop: Option<usize>) -> String {
        let index = match stop {
            Some(number) => match number.checked_sub(1) {
                Some(index) => Some(index),
                None => return OperationStatus::NotFound("stop 0".to_string()).to_string(),
            },
            None => None,
        };
        let before = self.app.progress.snapshot();
        match self.app.progress.check_in(index) {
            Some(after) if after == before => format!(
                "{}{after}",
                OperationStatus::Unchanged(format!("Nothing to do: {}", after.stage.with_icon()))
            ),
            Some(after) => format!("{}{after}", OperationStatus::Done("Checked in".to_string())),
            None => {
                let number = index.unwrap_or(before.current_stop_index) + 1;
                OperationStatus::NotFound(format!("stop {number}")).to_string()
            }
        }
    }

    fn answer_friend(&self, id: &str, decision: FriendDecision) -> nightplan_core::Result<String> {
        let request = self
            .app
            .friend_requests
            .respond(id, decision)
            .ok_or_else(|| NightplanError::FriendRequestNotFound { id: id.to_string() })?;
        Ok(OperationStatus::Done(format!("{id} is {}", request.status)).to_string())
    }
}

#[cfg(test)]
mod tests {
    use nightplan_core::{seed, AppBuilder, Config};

    use super::*;

    fn cli() -> Cli {
        let app = AppBuilder::new()
            .with_config(Config::default())
            .build()
            .unwrap();
        let plans = seed::demo_plans();
        app.progress.install(&plans);
        Cli::new(app, plans, TerminalRenderer::new(false))
    }

    fn output(cli: &Cli, line: &str) -> String {
        match cli.execute_line(line) {
            Flow::Continue(output) => output,
            Flow::Quit => panic!("unexpected quit on {line:?}"),
        }
    }

    #[test]
    fn test_parse_trailing_text() {
        let line = ShellLine::try_parse_from(["send", "f1", "see", "you", "soon"]).unwrap();
        match line.command {
            ShellCommand::Send { to, text } => {
                assert_eq!(to, "f1");
                assert_eq!(text.join(" "), "see you soon");
            }
            _ => panic!("expected send"),
        }
    }

    #[test]
    fn test_parse_invitation_decision() {
        let line = ShellLine::try_parse_from(["respond", "inv_1", "maybe"]).unwrap();
        assert!(matches!(
            line.command,
            ShellCommand::Respond {
                decision: InvitationDecision::Maybe,
                ..
            }
        ));
        assert!(ShellLine::try_parse_from(["respond", "inv_1", "sure"]).is_err());
    }

    #[test]
    fn test_start_then_start_again_is_unchanged() {
        let cli = cli();
        assert!(output(&cli, "start").starts_with("✓ Night started"));
        assert!(output(&cli, "start").starts_with("· Nothing to do"));
    }

    #[test]
    fn test_checkin_out_of_range() {
        let cli = cli();
        assert_eq!(output(&cli, "checkin 9"), "Not found: stop 9\n");
        assert_eq!(output(&cli, "checkin 0"), "Not found: stop 0\n");
        assert!(output(&cli, "checkin 2").starts_with("✓ Checked in"));
    }

    #[test]
    fn test_unknown_ids_are_reported_not_fatal() {
        let cli = cli();
        assert_eq!(
            output(&cli, "read direct_nobody"),
            "Error: Thread with ID direct_nobody not found\n"
        );
        assert_eq!(
            output(&cli, "accept fr_9"),
            "Error: Friend request with ID fr_9 not found\n"
        );
    }

    #[test]
    fn test_quit() {
        let cli = cli();
        assert!(matches!(cli.execute_line("quit"), Flow::Quit));
    }
}
