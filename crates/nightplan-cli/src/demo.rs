//! Scripted evening played by `np demo`.
//!
//! Drives every store through a typical night out and prints each event
//! the bus carries, followed by the final state of the stores.

use std::{sync::Arc, time::Duration};

use anyhow::Result;
use log::warn;
use nightplan_core::{
    display::{Conversation, FriendRequests, Invitations, Threads},
    models::Direction,
    params::{AppendMessage, CreatePlanThread, NewFriendRequest, NewInvitation, SendMessage},
    simulation::ScriptedReplies,
    App, AppEvent, FriendDecision, InvitationDecision, Participant, Plan,
};
use tokio::sync::broadcast::{error::TryRecvError, Receiver};

use crate::renderer::TerminalRenderer;

struct Script<'a> {
    events: Receiver<AppEvent>,
    renderer: &'a TerminalRenderer,
}

impl Script<'_> {
    /// Prints a step heading, then the events published since the last one.
    fn step(&mut self, title: &str) {
        self.renderer.render(&format!("### {title}\n"));
        loop {
            match self.events.try_recv() {
                Ok(event) => self.renderer.render_event(&format!("  {event}")),
                Err(TryRecvError::Lagged(skipped)) => warn!("demo missed {skipped} events"),
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
    }
}

pub async fn run(app: &App, plans: &[Plan], renderer: &TerminalRenderer) -> Result<()> {
    let mut script = Script {
        events: app.bus.subscribe(),
        renderer,
    };
    let sam = Participant::new("sam", "Sam");
    let alex = Participant::new("alex", "Alex");

    let progress = app.progress.install(plans);
    let Some(plan) = progress.current_plan else {
        renderer.render("No active plan to play.\n");
        return Ok(());
    };
    renderer.render(&plan.to_string());
    script.step("Plan installed");

    let thread_id = app.messages.create_plan_thread(&CreatePlanThread {
        plan_id: plan.id.clone(),
        plan_name: plan.name.clone(),
        participants: vec![sam.clone(), alex.clone()],
        plan_status: Some(plan.status),
        venue: plan.stops.first().map(|stop| stop.name.clone()),
    });
    app.messages
        .append_message(&AppendMessage::outgoing(&thread_id, "Heading out in 10!"));
    app.messages
        .append_message(&AppendMessage::incoming(&thread_id, alex.clone(), "Same"));
    script.step("Group chat");

    app.progress.start_night();
    app.progress.add_friend_en_route(&sam.id);
    script.step("Night started");

    if let Some(location) = plan.stops.first().and_then(|stop| stop.location) {
        if let Some(proximity) = app.progress.proximity(&location) {
            let nearby = if proximity.nearby { " (nearby)" } else { "" };
            renderer.render(&format!(
                "{} is {:.0} m away{nearby}\n",
                proximity.stop_name, proximity.distance_m
            ));
        }
    }
    app.progress.check_in(None);
    app.progress.remove_friend_en_route(&sam.id);
    script.step("Checked in");

    let replies = app.reply_scheduler(Arc::new(ScriptedReplies::default()));
    app.messages
        .send(&SendMessage::text(&sam.id, &sam.name, "Grabbed a table by the window"));
    replies.schedule_reply(&sam, "Grabbed a table by the window");
    app.notifications.send_ping(&alex);
    script.step("Messages sent");

    tokio::time::sleep(Duration::from_millis(app.config.reply_delay_ms + 50)).await;
    script.step("Sam replied");

    let invitation = app.invitations.add(&NewInvitation {
        plan_id: "2".to_string(),
        plan_name: "Saturday Karaoke".to_string(),
        from: alex.clone(),
        message: Some("You in?".to_string()),
    });
    app.invitations.respond(&invitation.id, InvitationDecision::Maybe);
    let request = app.friend_requests.add(&NewFriendRequest {
        counterpart: Participant::new("casey", "Casey"),
        direction: Direction::Incoming,
        mutual_friends: 2,
    });
    app.friend_requests.respond(&request.id, FriendDecision::Accept);
    script.step("Inbox answered");

    for _ in 1..plan.stops.len() {
        app.progress.depart();
        app.progress.move_to_next();
        app.progress.check_in(None);
    }
    app.progress.move_to_next();
    script.step("Night over");

    renderer.render(&app.progress.snapshot().to_string());
    renderer.render("\n## Conversations\n\n");
    renderer.render(&Threads(app.messages.threads_pinned_first()).to_string());
    renderer.render(&format!("\n## {}\n\n", plan.name));
    let history = app.messages.messages(&thread_id).unwrap_or_default();
    renderer.render(&Conversation(history).to_string());
    renderer.render("\n## Invitations\n\n");
    renderer.render(&Invitations(app.invitations.items()).to_string());
    renderer.render("\n## Friend requests\n\n");
    renderer.render(&FriendRequests(app.friend_requests.items()).to_string());
    Ok(())
}
