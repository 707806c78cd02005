pub mod errors;
pub mod reply;
pub mod utility;

use std::sync::Arc;

use tracing::debug;
use twilight_model::{
    application::{
        command::{Command, CommandType},
        interaction::{
            InteractionData,
            application_command::{CommandData, CommandOptionValue},
        },
    },
    gateway::payload::incoming::{InteractionCreate, MessageCreate},
};
use twilight_util::builder::command::{CommandBuilder, IntegerBuilder};

use errors::{report_interaction_error, report_message_error};
use reply::respond_notice;
use rusty_core::Context;
use rusty_paginator::COMMAND_PREFIX;
use rusty_paginator::pagination::{ACTION_ID_PREFIX, Trigger};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum InteractionRoute {
    PaginationControls,
}

fn route_interaction(custom_id: &str) -> Option<InteractionRoute> {
    const ROUTES: [(&str, InteractionRoute); 1] =
        [(ACTION_ID_PREFIX, InteractionRoute::PaginationControls)];

    ROUTES
        .into_iter()
        .find_map(|(prefix, route)| custom_id.starts_with(prefix).then_some(route))
}

// Global command meta data
pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    utility::help::META,
    utility::pages::META,
    // Add new commands here
];

pub async fn handle_message(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    if msg.author.bot {
        return Ok(());
    }

    let Some((cmd, arg1)) = split_command(&msg.content) else {
        return Ok(());
    };
    let trigger = Trigger::from_message(&msg);

    let result = match cmd.as_str() {
        "help" => match parse_number_arg(arg1) {
            Ok(page) => utility::help::run(ctx.clone(), trigger, msg.author.id, page).await,
            Err(_) => send_usage(&ctx, &trigger, &utility::help::META).await,
        },
        "pages" => match parse_number_arg(arg1) {
            Ok(count) => utility::pages::run(ctx.clone(), trigger, msg.author.id, count).await,
            Err(_) => send_usage(&ctx, &trigger, &utility::pages::META).await,
        },
        // Add new commands here
        _ => Ok(()),
    };

    if let Err(source) = result {
        report_message_error(&ctx.http, msg.channel_id, &cmd, &source).await;
    }

    Ok(())
}

pub async fn handle_interaction(
    ctx: Context,
    interaction: Box<InteractionCreate>,
) -> anyhow::Result<()> {
    match interaction.data.as_ref() {
        Some(InteractionData::ApplicationCommand(data)) => {
            if let Err(source) = run_slash_command(&ctx, &interaction, data).await {
                report_interaction_error(&ctx.http, &interaction, &data.name, &source).await;
            }
        }
        Some(InteractionData::MessageComponent(data)) => match route_interaction(&data.custom_id) {
            Some(InteractionRoute::PaginationControls) => {
                let _handled = ctx
                    .sessions
                    .handle_component(Arc::clone(&ctx.http), &interaction)
                    .await?;
            }
            None => debug!(custom_id = %data.custom_id, "unrouted component interaction"),
        },
        _ => {}
    }

    Ok(())
}

async fn run_slash_command(
    ctx: &Context,
    interaction: &InteractionCreate,
    data: &CommandData,
) -> anyhow::Result<()> {
    let Some(trigger) = Trigger::from_interaction(interaction) else {
        anyhow::bail!("interaction for /{} has no channel", data.name);
    };
    let Some(author_id) = interaction.author_id() else {
        anyhow::bail!("interaction for /{} has no author", data.name);
    };

    match data.name.as_str() {
        "help" => {
            let page = integer_option(data, "page");
            utility::help::run(ctx.clone(), trigger, author_id, page).await
        }
        "pages" => {
            let count = integer_option(data, "count");
            utility::pages::run(ctx.clone(), trigger, author_id, count).await
        }
        other => {
            debug!(command = other, "unknown chat input command");
            Ok(())
        }
    }
}

/// Chat input definitions for every command in [`COMMANDS`].
pub fn slash_commands() -> Vec<Command> {
    vec![
        CommandBuilder::new(
            utility::help::META.name,
            utility::help::META.desc,
            CommandType::ChatInput,
        )
        .option(IntegerBuilder::new("page", "Page to open first").min_value(1))
        .build(),
        CommandBuilder::new(
            utility::pages::META.name,
            utility::pages::META.desc,
            CommandType::ChatInput,
        )
        .option(
            IntegerBuilder::new("count", "Number of pages to generate")
                .min_value(1)
                .max_value(utility::pages::MAX_DEMO_PAGES as i64),
        )
        .build(),
    ]
}

async fn send_usage(ctx: &Context, trigger: &Trigger, meta: &CommandMeta) -> anyhow::Result<()> {
    let out = format!("Usage: `{}`", meta.usage);
    respond_notice(&ctx.http, trigger, &out).await
}

/// Split a prefixed message into a lowercase command name and its first argument.
fn split_command(content: &str) -> Option<(String, Option<&str>)> {
    let content = content.trim().strip_prefix(COMMAND_PREFIX)?.trim();

    let mut parts = content.split_whitespace();
    let cmd = parts.next()?.to_ascii_lowercase();
    Some((cmd, parts.next()))
}

fn parse_number_arg(arg: Option<&str>) -> Result<Option<usize>, std::num::ParseIntError> {
    arg.map(str::parse::<usize>).transpose()
}

/// Negative values map to zero so range checks reject them.
fn integer_option(data: &CommandData, name: &str) -> Option<usize> {
    data.options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| match option.value {
            CommandOptionValue::Integer(value) => Some(usize::try_from(value).unwrap_or(0)),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_pagination_controls_only() {
        assert_eq!(
            route_interaction("pg.nextPage"),
            Some(InteractionRoute::PaginationControls)
        );
        assert_eq!(route_interaction("terminate:confirm"), None);
    }

    #[test]
    fn splits_prefixed_commands() {
        assert_eq!(
            split_command("  !HELP 2 extra"),
            Some(("help".to_owned(), Some("2")))
        );
        assert_eq!(split_command("!pages"), Some(("pages".to_owned(), None)));
        assert_eq!(split_command("help"), None);
        assert_eq!(split_command("!"), None);
    }

    #[test]
    fn number_args_reject_garbage() {
        assert_eq!(parse_number_arg(None), Ok(None));
        assert_eq!(parse_number_arg(Some("12")), Ok(Some(12)));
        assert!(parse_number_arg(Some("-1")).is_err());
        assert!(parse_number_arg(Some("two")).is_err());
    }

    #[test]
    fn catalog_names_are_unique() {
        let mut names: Vec<_> = COMMANDS.iter().map(|cmd| cmd.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), COMMANDS.len());
    }

    #[test]
    fn slash_commands_cover_catalog() {
        let commands = slash_commands();
        assert_eq!(commands.len(), COMMANDS.len());
        assert!(commands.iter().all(|command| command.options.len() == 1));
    }
}
