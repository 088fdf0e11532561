//! Owner, channel-type and permission gates.

mod common;

use common::*;
use harmony_router::command::{ChannelRestriction, CommandBuilder};
use harmony_router::router::{MISSING_PERMISSIONS, OWNER_ONLY};
use harmony_router::{CommandOutput, CommandSpec, DispatchOutcome, Permissions, Snowflake};

fn shutdown() -> CommandSpec {
    CommandBuilder::new("shutdown")
        .owner_only()
        .variant(vec![], |_| async { Ok(CommandOutput::value("bye")) })
        .build()
}

fn kick() -> CommandSpec {
    CommandBuilder::new("kick")
        .require_permissions(Permissions::KICK_MEMBERS | Permissions::SEND_MESSAGES)
        .variant(vec![], |_| async { Ok(CommandOutput::value("kicked")) })
        .build()
}

fn restricted(restriction: ChannelRestriction) -> CommandSpec {
    CommandBuilder::new("where")
        .channel(restriction)
        .variant(vec![], |_| async { Ok(CommandOutput::value("here")) })
        .build()
}

fn rejected(command: &str) -> DispatchOutcome {
    DispatchOutcome::Rejected {
        command: command.to_string(),
    }
}

#[tokio::test]
async fn test_owner_only_command_refuses_others() {
    let platform = MockPlatform::new();
    let router = router(&platform);
    router.register_command(shutdown()).unwrap();

    let outcome = router.dispatch(guild_message(alice(), "!shutdown")).await;

    assert_eq!(outcome, rejected("shutdown"));
    assert_eq!(platform.sent_texts(), vec![format!("🚫 {OWNER_ONLY} 🚫")]);
}

#[tokio::test]
async fn test_owner_only_command_runs_for_owner() {
    let platform = MockPlatform::new();
    let router = router(&platform);
    router.register_command(shutdown()).unwrap();

    router.dispatch(guild_message(owner(), "!shutdown")).await;
    assert_eq!(platform.sent_texts(), vec!["bye"]);
}

#[tokio::test]
async fn test_configured_owner_overrides_identity() {
    let platform = MockPlatform::new();
    let router = router_with(&platform, &format!("[bot]\nowner_id = {ALICE}\n"));
    router.register_command(shutdown()).unwrap();

    router.dispatch(guild_message(alice(), "!shutdown")).await;
    assert_eq!(
        router.dispatch(guild_message(owner(), "!shutdown")).await,
        rejected("shutdown")
    );
    assert_eq!(platform.sent_texts()[0], "bye");
}

#[tokio::test]
async fn test_owner_gate_runs_before_permission_lookup() {
    let platform = MockPlatform::new();
    let router = router(&platform);
    router
        .register_command(
            CommandBuilder::new("nuke")
                .owner_only()
                .require_permissions(Permissions::ADMINISTRATOR)
                .variant(vec![], |_| async { Ok(CommandOutput::None) })
                .build(),
        )
        .unwrap();

    router.dispatch(guild_message(alice(), "!nuke")).await;
    assert_eq!(platform.permission_lookups(), 0);
}

#[tokio::test]
async fn test_missing_permissions_are_rejected() {
    let platform = MockPlatform::new();
    platform.grant(Snowflake::new(ALICE), Permissions::SEND_MESSAGES);
    let router = router(&platform);
    router.register_command(kick()).unwrap();

    let outcome = router.dispatch(guild_message(alice(), "!kick")).await;

    assert_eq!(outcome, rejected("kick"));
    assert_eq!(
        platform.sent_texts(),
        vec![format!("🚫 {MISSING_PERMISSIONS} 🚫")]
    );
}

#[tokio::test]
async fn test_superset_of_permissions_passes() {
    let platform = MockPlatform::new();
    platform.grant(
        Snowflake::new(ALICE),
        Permissions::SEND_MESSAGES | Permissions::KICK_MEMBERS | Permissions::BAN_MEMBERS,
    );
    let router = router(&platform);
    router.register_command(kick()).unwrap();

    router.dispatch(guild_message(alice(), "!kick")).await;
    assert_eq!(platform.sent_texts(), vec!["kicked"]);
}

#[tokio::test]
async fn test_direct_messages_skip_permission_check() {
    let platform = MockPlatform::new();
    let router = router(&platform);
    router.register_command(kick()).unwrap();

    router.dispatch(dm_message(alice(), "!kick")).await;

    assert_eq!(platform.permission_lookups(), 0);
    assert_eq!(platform.sent()[0].channel, Snowflake::new(DM_CHANNEL));
    assert_eq!(platform.sent_texts(), vec!["kicked"]);
}

#[tokio::test]
async fn test_permission_lookup_failure_is_uncaught() {
    let platform = MockPlatform::new();
    platform.fail_permission_lookups();
    let uncaught = RecordingUncaught::default();
    let router = builder(&platform)
        .uncaught_error_handler(uncaught.clone())
        .build();
    router.register_command(kick()).unwrap();

    let outcome = router.dispatch(guild_message(alice(), "!kick")).await;

    assert_eq!(
        outcome,
        DispatchOutcome::Failed {
            command: Some("kick".into())
        }
    );
    assert_eq!(uncaught.commands(), vec![Some("kick".to_string())]);
    assert!(platform.sent().is_empty());
}

#[tokio::test]
async fn test_dm_only_command_in_guild() {
    let platform = MockPlatform::new();
    let router = router(&platform);
    router
        .register_command(restricted(ChannelRestriction::DirectMessage))
        .unwrap();

    assert_eq!(
        router.dispatch(guild_message(alice(), "!where")).await,
        rejected("where")
    );
    router.dispatch(dm_message(alice(), "!where")).await;

    assert_eq!(
        platform.sent_texts(),
        vec![
            "🚫 This command is not applicable in this channel type! It can only be executed in dm channels! 🚫".to_string(),
            "here".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_server_only_command_in_dm() {
    let platform = MockPlatform::new();
    let router = router(&platform);
    router
        .register_command(restricted(ChannelRestriction::Server))
        .unwrap();

    assert_eq!(
        router.dispatch(dm_message(alice(), "!where")).await,
        rejected("where")
    );
    assert_eq!(
        platform.sent_texts(),
        vec!["🚫 This command is not applicable in this channel type! It can only be executed in server channels! 🚫"]
    );
}

#[tokio::test]
async fn test_custom_error_emoji() {
    let platform = MockPlatform::new();
    let router = router_with(&platform, "[render]\nerror_emoji = \"❌\"\n");
    router.register_command(shutdown()).unwrap();

    router.dispatch(guild_message(alice(), "!shutdown")).await;
    assert_eq!(platform.sent_texts(), vec![format!("❌ {OWNER_ONLY} ❌")]);
}
