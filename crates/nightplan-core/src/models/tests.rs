#[cfg(test)]
mod model_tests {
    use std::collections::BTreeSet;

    use jiff::Timestamp;

    use crate::{
        display::{Conversation, Invitations, Threads},
        models::{
            DeliveryStatus, Direction, FriendRequest, Invitation, InvitationDecision, Message,
            MessageThread, MessageType, Participant, Plan, PlanProgress, PlanStatus,
            ProgressStage, ResponseStatus, ThreadContext, ThreadKind,
        },
        seed::demo_plans,
    };

    fn fixed_time() -> Timestamp {
        Timestamp::from_second(1640995200).unwrap() // 2022-01-01 00:00:00 UTC
    }

    fn create_test_plan() -> Plan {
        demo_plans().remove(0)
    }

    fn create_test_message(content: &str) -> Message {
        Message {
            id: "msg_1".to_string(),
            sender_id: "f1".to_string(),
            recipient_id: "me".to_string(),
            content: content.to_string(),
            message_type: MessageType::Message,
            timestamp: fixed_time(),
            status: DeliveryStatus::Delivered,
        }
    }

    fn create_test_thread() -> MessageThread {
        MessageThread {
            id: "direct_f1".to_string(),
            kind: ThreadKind::Direct,
            context: ThreadContext::Direct,
            name: "Sam".to_string(),
            participants: vec![Participant::new("f1", "Sam")],
            messages: vec![],
            last_message: Some(create_test_message("see you at 9")),
            timestamp: fixed_time(),
            unread: true,
            pinned: true,
            plan_id: None,
            plan_status: None,
            venue: Some("Basement Jazz".to_string()),
            activity: 1,
        }
    }

    #[test]
    fn test_progress_stage_serializes_snake_case() {
        let json = serde_json::to_string(&ProgressStage::MovingToNext).unwrap();
        assert_eq!(json, "\"moving_to_next\"");
        assert_eq!(ProgressStage::MovingToNext.as_str(), "moving_to_next");
        assert!(ProgressStage::Completed.is_terminal());
        assert!(!ProgressStage::EnRoute.is_terminal());
    }

    #[test]
    fn test_thread_kind_serializes_kebab_case() {
        let json = serde_json::to_string(&ThreadKind::MapGroup).unwrap();
        assert_eq!(json, "\"map-group\"");
    }

    #[test]
    fn test_plan_status_from_str() {
        assert_eq!("ACTIVE".parse::<PlanStatus>().unwrap(), PlanStatus::Active);
        assert_eq!("maybe".parse::<PlanStatus>().unwrap(), PlanStatus::Maybe);
        assert!("archived".parse::<PlanStatus>().is_err());
    }

    #[test]
    fn test_decisions_map_to_statuses() {
        assert_eq!(
            ResponseStatus::from(InvitationDecision::Maybe),
            ResponseStatus::Maybe
        );
        assert_eq!(
            "declined".parse::<InvitationDecision>().unwrap(),
            InvitationDecision::Decline
        );
        assert!("maybe".parse::<crate::models::FriendDecision>().is_err());
    }

    #[test]
    fn test_plan_totals() {
        let plan = create_test_plan();
        assert_eq!(plan.total_minutes(), 255);
        assert!((plan.total_cost() - 78.0).abs() < f64::EPSILON);
        assert_eq!(plan.last_stop_index(), Some(2));
    }

    #[test]
    fn test_plan_display() {
        let output = create_test_plan().to_string();

        assert!(output.contains("# Downtown Friday"));
        assert!(output.contains("- When: Tonight 8:00 PM"));
        assert!(output.contains("- Status: active"));
        assert!(output.contains("## Stops"));
        assert!(output.contains("1. Rooftop Lounge (bar) · 90 min · $35.00"));
        assert!(output.contains("3. Night Owl Diner"));
    }

    #[test]
    fn test_progress_helpers_and_display() {
        let progress = PlanProgress {
            current_plan: Some(create_test_plan()),
            stage: ProgressStage::CheckedIn,
            current_stop_index: 1,
            friends_en_route: BTreeSet::from(["f2".to_string(), "f1".to_string()]),
            night_start_time: None,
            last_check_in_time: None,
        };

        assert_eq!(progress.current_stop().unwrap().name, "Basement Jazz");
        assert_eq!(progress.stops_remaining(), 1);
        assert!(progress.is_in_progress());

        let output = progress.to_string();
        assert!(output.contains("## Downtown Friday"));
        assert!(output.contains("- Stage: 📍 Checked in"));
        assert!(output.contains("- Stop 2/3: Basement Jazz"));
        assert!(output.contains("- Remaining: 1"));
        assert!(output.contains("- Friends en route: f1, f2"));
    }

    #[test]
    fn test_empty_progress_display() {
        let progress = PlanProgress::default();
        assert_eq!(progress.to_string(), "No active plan.\n");
        assert_eq!(progress.stops_remaining(), 0);
        assert!(!progress.is_in_progress());
    }

    #[test]
    fn test_thread_display() {
        let output = create_test_thread().to_string();
        assert!(output.starts_with("- 📌 **Sam** `direct_f1` @ Basement Jazz"));
        assert!(output.contains("f1: see you at 9"));
    }

    #[test]
    fn test_thread_matches() {
        let thread = create_test_thread();
        assert!(thread.matches("jazz"));
        assert!(thread.matches("at 9"));
        assert!(thread.matches("sam"));
        assert!(!thread.matches("karaoke"));
    }

    #[test]
    fn test_collections_display() {
        assert_eq!(Threads(vec![]).to_string(), "No conversations yet.\n");
        assert_eq!(Invitations(vec![]).to_string(), "No invitations.\n");
        assert_eq!(Conversation(vec![]).to_string(), "No messages yet.\n");

        let conversation = Conversation(vec![create_test_message("A"), create_test_message("B")]);
        assert_eq!(conversation.to_string(), "> f1: A\n> f1: B\n");
    }

    #[test]
    fn test_invitation_and_request_display() {
        let invitation = Invitation {
            id: "inv_1".to_string(),
            plan_id: "1".to_string(),
            plan_name: "Downtown Friday".to_string(),
            from: Participant::new("f1", "Sam"),
            message: Some("you in?".to_string()),
            status: ResponseStatus::Pending,
            created_at: fixed_time(),
            responded_at: None,
            read: false,
        };
        assert_eq!(
            invitation.to_string(),
            "- `inv_1` Sam invited you to **Downtown Friday** (pending): \"you in?\"\n"
        );

        let request = FriendRequest {
            id: "fr_1".to_string(),
            counterpart: Participant::new("f2", "Alex"),
            direction: Direction::Incoming,
            mutual_friends: 3,
            status: ResponseStatus::Accepted,
            created_at: fixed_time(),
            responded_at: Some(fixed_time()),
            read: true,
        };
        assert_eq!(
            request.to_string(),
            "- `fr_1` from **Alex** (accepted) · 3 mutual\n"
        );
    }
}
