//! Built-in converters resolving platform entities through the platform.

mod common;

use common::*;
use harmony_router::command::{CommandBuilder, arg};
use harmony_router::{
    Channel, CommandOutput, CommandSpec, DispatchOutcome, Guild, Member, Role, Snowflake, User,
};

fn echo<T: Clone + Send + Sync + 'static>(name: &str, show: fn(&T) -> String) -> CommandSpec {
    CommandBuilder::new(name)
        .variant(vec![arg::<T>("value")], move |inv| async move {
            let value = inv.args.arg::<T>(0)?;
            Ok(CommandOutput::value(show(&value)))
        })
        .build()
}

fn platform_with_entities() -> std::sync::Arc<MockPlatform> {
    let platform = MockPlatform::new();
    let guild = Snowflake::new(GUILD);
    platform.add_member(guild, alice(), Some("Al"));
    platform.add_member(guild, User::new(11, "bob"), None);
    platform.add_user(User::new(12, "carol"));
    platform.add_role(Role {
        id: Snowflake::new(500),
        guild_id: guild,
        name: "mods".into(),
    });
    platform.add_channel(Channel {
        id: Snowflake::new(CHANNEL),
        guild_id: Some(guild),
        name: "general".into(),
    });
    platform.add_guild(Guild {
        id: guild,
        name: "Test Guild".into(),
    });
    platform
}

#[tokio::test]
async fn test_user_by_mention_id_and_tag() {
    let platform = platform_with_entities();
    let router = router(&platform);
    router
        .register_command(echo::<User>("who", |u| u.name.clone()))
        .unwrap();

    for content in ["!who <@12>", "!who <@!11>", "!who 12", "!who bob#0000", "!who alice#0001"] {
        router.dispatch(guild_message(alice(), content)).await;
    }
    // The bot resolves without a platform lookup.
    router.dispatch(guild_message(alice(), "!who <@1>")).await;

    assert_eq!(
        platform.sent_texts(),
        vec!["carol", "bob", "carol", "bob", "alice", "harmony"]
    );
}

#[tokio::test]
async fn test_unknown_user_is_a_mismatch() {
    let platform = platform_with_entities();
    let router = router(&platform);
    router
        .register_command(echo::<User>("who", |u| u.name.clone()))
        .unwrap();

    for content in ["!who <@999>", "!who <#200>", "!who nobody"] {
        assert_eq!(
            router.dispatch(guild_message(alice(), content)).await,
            DispatchOutcome::NoMatchingVariant {
                command: "who".into()
            },
            "content {content:?}"
        );
    }
}

#[tokio::test]
async fn test_member_uses_guild_nickname() {
    let platform = platform_with_entities();
    let router = router(&platform);
    router
        .register_command(echo::<Member>("nick", |m| m.display_name().to_string()))
        .unwrap();

    router.dispatch(guild_message(alice(), "!nick <@10>")).await;
    router.dispatch(guild_message(alice(), "!nick <@11>")).await;
    // Carol is a user but not a member.
    let outcome = router.dispatch(guild_message(alice(), "!nick <@12>")).await;

    assert_eq!(platform.sent_texts(), vec!["Al", "bob"]);
    assert!(matches!(outcome, DispatchOutcome::NoMatchingVariant { .. }));
}

#[tokio::test]
async fn test_role_channel_and_guild() {
    let platform = platform_with_entities();
    let router = router(&platform);
    router
        .register_command(echo::<Role>("role", |r| r.name.clone()))
        .unwrap();
    router
        .register_command(echo::<Channel>("chan", |c| c.name.clone()))
        .unwrap();
    router
        .register_command(echo::<Guild>("guild", |g| g.name.clone()))
        .unwrap();

    for content in [
        "!role <@&500>",
        "!role mods",
        "!chan <#200>",
        "!chan general",
        "!guild 100",
    ] {
        router.dispatch(guild_message(alice(), content)).await;
    }

    assert_eq!(
        platform.sent_texts(),
        vec!["mods", "mods", "general", "general", "Test Guild"]
    );
}

#[tokio::test]
async fn test_roles_do_not_resolve_in_direct_messages() {
    let platform = platform_with_entities();
    let router = router(&platform);
    router
        .register_command(echo::<Role>("role", |r| r.name.clone()))
        .unwrap();

    assert!(matches!(
        router.dispatch(dm_message(alice(), "!role <@&500>")).await,
        DispatchOutcome::NoMatchingVariant { .. }
    ));
}

#[tokio::test]
async fn test_bool_is_strict() {
    let platform = MockPlatform::new();
    let router = router(&platform);
    router
        .register_command(echo::<bool>("flag", |b| b.to_string()))
        .unwrap();

    router.dispatch(guild_message(alice(), "!flag true")).await;
    router.dispatch(guild_message(alice(), "!flag FALSE")).await;
    let outcome = router.dispatch(guild_message(alice(), "!flag maybe")).await;

    assert_eq!(platform.sent_texts(), vec!["true", "false"]);
    assert!(matches!(outcome, DispatchOutcome::NoMatchingVariant { .. }));
}
