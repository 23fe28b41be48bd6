//! Contains the built-in help command and surrounding infrastructure

use std::fmt::Write as _;

/// Optional configuration for how the help message from [`help()`] looks
pub struct HelpConfiguration<'a> {
    /// Extra text displayed at the bottom of your message. Can be used for help and tips specific
    /// to your bot
    pub extra_text_at_bottom: &'a str,
    /// Whether to list subcommands below their parent in the command list
    pub show_subcommands: bool,
    /// Whether to include [`crate::Command::description`] (above [`crate::Command::help_text`]).
    pub include_description: bool,
    #[doc(hidden)]
    pub __non_exhaustive: (),
}

impl Default for HelpConfiguration<'_> {
    fn default() -> Self {
        Self {
            extra_text_at_bottom: "",
            show_subcommands: false,
            include_description: true,
            __non_exhaustive: (),
        }
    }
}

/// Convenience function to align descriptions behind commands
struct TwoColumnList(Vec<(String, Option<String>)>);

impl TwoColumnList {
    /// Creates a new [`TwoColumnList`]
    fn new() -> Self {
        Self(Vec::new())
    }

    /// Add a line that needs the padding between the columns
    fn push_two_columns(&mut self, left: String, right: String) {
        self.0.push((left, Some(right)));
    }

    /// Add a line that doesn't influence the first columns's width
    fn push_heading(&mut self, heading: &str) {
        if !self.0.is_empty() {
            self.0.push((String::new(), None));
        }
        self.0.push((format!("{}:", heading), None));
    }

    /// Convert the list into a string with aligned right column
    fn into_string(self) -> String {
        let width = self
            .0
            .iter()
            .filter(|(_, right)| right.as_deref().map_or(false, |r| !r.is_empty()))
            .map(|(left, _)| left.chars().count())
            .max()
            .unwrap_or(0);

        let mut text = String::new();
        for (left, right) in self.0 {
            match right {
                Some(right) if !right.is_empty() => {
                    let _ = writeln!(text, "{:width$}   {}", left, right, width = width);
                }
                _ => {
                    let _ = writeln!(text, "{}", left);
                }
            }
        }
        text
    }
}

/// `~name <args>`, or just `~name` if the command takes no positional arguments
fn invocation<U, E>(command: &crate::Command<U, E>, prefix: &str) -> String {
    let usage = command.args.usage();
    if usage.is_empty() {
        format!("{}{}", prefix, command.qualified_name)
    } else {
        format!("{}{} {}", prefix, command.qualified_name, usage)
    }
}

/// Adds one line per visible subcommand. Only goes one level deep, deeper levels are shown when
/// the user asks for help on the subcommand
fn push_subcommands<U, E>(
    list: &mut TwoColumnList,
    command: &crate::Command<U, E>,
    prefix: &str,
    indent: &str,
) {
    for subcommand in command.subcommands.iter().filter(|c| !c.hidden) {
        list.push_two_columns(
            format!("{}{}", indent, invocation(subcommand, prefix)),
            subcommand.description.clone().unwrap_or_default(),
        );
    }
}

/// Renders the overview of all commands, grouped by category in order of first appearance.
/// Hidden commands are omitted.
///
/// ```rust
/// # fn noop(_: argot::Context<'_, (), ()>, _: argot::Args) -> argot::BoxFuture<'_, Result<(), ()>> {
/// #     Box::pin(async { Ok(()) })
/// # }
/// let commands = vec![argot::Command::<(), ()> {
///     description: Some("Checks if the bot is alive".into()),
///     ..argot::Command::new("ping", noop)
/// }];
/// let text = argot::builtins::command_list_text(&commands, "~", &Default::default());
/// assert_eq!(text, "```\nCommands:\n  ~ping   Checks if the bot is alive\n\n```");
/// ```
pub fn command_list_text<U, E>(
    commands: &[crate::Command<U, E>],
    prefix: &str,
    config: &HelpConfiguration<'_>,
) -> String {
    // Vec instead of a map to keep the order in which categories first appear
    let mut categories = Vec::<(Option<&str>, Vec<&crate::Command<U, E>>)>::new();
    for command in commands.iter().filter(|c| !c.hidden) {
        let category = command.category.as_deref();
        match categories.iter_mut().find(|(name, _)| *name == category) {
            Some((_, commands)) => commands.push(command),
            None => categories.push((category, vec![command])),
        }
    }

    let mut list = TwoColumnList::new();
    for (category, commands) in categories {
        list.push_heading(category.unwrap_or("Commands"));
        for command in commands {
            list.push_two_columns(
                format!("  {}", invocation(command, prefix)),
                command.description.clone().unwrap_or_default(),
            );
            if config.show_subcommands {
                push_subcommands(&mut list, command, prefix, "    ");
            }
        }
    }

    let mut text = String::from("```\n");
    text += &list.into_string();
    text += "\n";
    text += config.extra_text_at_bottom;
    text += "```";
    text
}

/// Renders the detailed help of a single (sub)command: invocation, aliases, description,
/// arguments, flags, examples and subcommands
pub fn command_help_text<U, E>(
    command: &crate::Command<U, E>,
    prefix: &str,
    config: &HelpConfiguration<'_>,
) -> String {
    let mut text = format!("**`{}`**\n", invocation(command, prefix));
    if !command.aliases.is_empty() {
        let aliases = command
            .aliases
            .iter()
            .map(|alias| format!("`{}`", alias))
            .collect::<Vec<_>>();
        let _ = writeln!(text, "Aliases: {}", aliases.join(", "));
    }

    text += "\n";
    text += &match (&command.description, &command.help_text) {
        (Some(description), Some(help_text)) if config.include_description => {
            format!("{}\n\n{}", description, help_text)
        }
        (_, Some(help_text)) => help_text.clone(),
        (Some(description), None) => description.clone(),
        (None, None) => "No help available".to_owned(),
    };

    let args = &command.args;
    let mut list = TwoColumnList::new();
    if args.positional_count() > 0 {
        list.push_heading("Arguments");
        let required = args.required.iter().map(|a| (&a.name, &a.description, true));
        let optional = args.optional.iter().map(|a| (&a.name, &a.description, false));
        for (name, description, is_required) in required.chain(optional) {
            let description = format!(
                "({}) {}",
                if is_required { "required" } else { "optional" },
                description.as_deref().unwrap_or(""),
            );
            list.push_two_columns(format!("  {}", name), description.trim_end().to_owned());
        }
    }
    if !args.flags.is_empty() {
        list.push_heading("Flags");
        for line in args.flag_usage() {
            list.push_two_columns(format!("  {}", line), String::new());
        }
    }
    if !command.examples.is_empty() {
        list.push_heading("Examples");
        for example in &command.examples {
            list.push_two_columns(format!("  {}{}", prefix, example), String::new());
        }
    }
    if command.subcommands.iter().any(|c| !c.hidden) {
        list.push_heading("Subcommands");
        push_subcommands(&mut list, command, prefix, "  ");
    }

    let list = list.into_string();
    if !list.is_empty() {
        text += "\n\n```\n";
        text += &list;
        text += "```";
    }
    text
}

/// A help command that replies with a plain text overview of all commands, grouped by category,
/// or with the detailed help of a single command if a command name is given.
///
/// ```rust,no_run
/// # type Error = Box<dyn std::error::Error + Send + Sync>;
/// use argot::{types, ArgConfig, Command, OptionalArg, Syntax};
///
/// let help = Command::<(), Error> {
///     description: Some("Show this menu".into()),
///     args: ArgConfig::new(Syntax::Shellword)
///         .optional(OptionalArg::new("command", types::Text::default()))
///         .variadic(),
///     ..Command::new("help", |ctx, args| {
///         Box::pin(async move {
///             let command = args.get::<Vec<String>>(0).map(|words| words.join(" "));
///             let config = argot::builtins::HelpConfiguration {
///                 extra_text_at_bottom: "Type ~help command for more info on a command.",
///                 ..Default::default()
///             };
///             argot::builtins::help(ctx, command.as_deref(), config).await?;
///             Ok(())
///         })
///     })
/// };
/// ```
/// Output:
/// ```text
/// Moderation:
///   ~ban <user> [reason...]   Bans another person
///   ~move <channel>           Move a discussion to another channel
/// Commands:
///   ~help [command...]        Show this menu
///
/// Type ~help command for more info on a command.
/// ```
pub async fn help<U, E>(
    ctx: crate::Context<'_, U, E>,
    command: Option<&str>,
    config: HelpConfiguration<'_>,
) -> Result<(), crate::serenity_prelude::Error> {
    // The mention prefix would render as a raw `<@id>`, so prefer the configured prefix
    let prefix = ctx
        .framework()
        .options()
        .prefix_options
        .prefix
        .as_deref()
        .unwrap_or_else(|| ctx.prefix());
    let commands = &ctx.framework().options().commands;

    ctx.say(help_text(commands, command, prefix, &config)).await?;
    Ok(())
}

/// The reply of [`help`]: the help of a single visible command, or the command list
fn help_text<U, E>(
    commands: &[crate::Command<U, E>],
    command: Option<&str>,
    prefix: &str,
    config: &HelpConfiguration<'_>,
) -> String {
    let command_name = match command.map(str::trim).filter(|c| !c.is_empty()) {
        Some(x) => x,
        None => return command_list_text(commands, prefix, config),
    };

    let mut parent_commands = Vec::new();
    match crate::find_command(commands, command_name, true, &mut parent_commands) {
        Some((command, _, _))
            if !command.hidden && !parent_commands.iter().any(|c| c.hidden) =>
        {
            command_help_text(command, prefix, config)
        }
        _ => format!("No such command `{}`", command_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{types, ArgConfig, Command, Flag, OptionalArg, RequiredArg, Syntax};

    fn noop(_: crate::Context<'_, (), ()>, _: crate::Args) -> crate::BoxFuture<'_, Result<(), ()>> {
        Box::pin(async { Ok(()) })
    }

    fn commands() -> Vec<Command<(), ()>> {
        let mut commands = vec![
            Command {
                description: Some("Bans another person".into()),
                category: Some("Moderation".into()),
                args: ArgConfig::new(Syntax::Shellword)
                    .required(RequiredArg::new("user", types::Text::default()))
                    .optional(OptionalArg::new("reason", types::Text::default()))
                    .variadic(),
                ..Command::new("ban", noop)
            },
            Command {
                description: Some("Pong".into()),
                ..Command::new("ping", noop)
            },
            Command {
                hidden: true,
                ..Command::new("secret", noop)
            },
            Command {
                description: Some("Manage tags".into()),
                category: Some("Moderation".into()),
                ..Command::group(
                    "tag",
                    vec![
                        Command {
                            description: Some("Creates a tag".into()),
                            args: ArgConfig::new(Syntax::Comma)
                                .required(RequiredArg::new("name", types::Text::default()))
                                .required(RequiredArg::new("content", types::Text::default())),
                            ..Command::new("add", noop)
                        },
                        Command {
                            hidden: true,
                            ..Command::new("purge", noop)
                        },
                    ],
                )
            },
        ];
        crate::set_qualified_names(&mut commands);
        commands
    }

    #[test]
    fn test_command_list_text() {
        let commands = commands();
        assert_eq!(
            command_list_text(&commands, "~", &Default::default()),
            "```
Moderation:
  ~ban <user> [reason...]   Bans another person
  ~tag                      Manage tags

Commands:
  ~ping                     Pong

```"
        );

        let config = HelpConfiguration {
            show_subcommands: true,
            extra_text_at_bottom: "Bottom text",
            ..Default::default()
        };
        assert_eq!(
            command_list_text(&commands, "!", &config),
            "```
Moderation:
  !ban <user> [reason...]        Bans another person
  !tag                           Manage tags
    !tag add <name>, <content>   Creates a tag

Commands:
  !ping                          Pong

Bottom text```"
        );
    }

    #[test]
    fn test_command_help_text() {
        let command = Command::<(), ()> {
            aliases: vec!["r".into()],
            description: Some("Reminds you of something".into()),
            help_text: Some("The reminder is sent as a DM.".into()),
            args: ArgConfig::new(Syntax::Shellword)
                .required(RequiredArg::new("when", types::Duration::default()).description("Delay"))
                .optional(OptionalArg::new("text", types::Text::default()))
                .flag(Flag::new("silent", types::Switch).alias("s")),
            examples: vec!["remind 1h30m stretch".into()],
            ..Command::new("remind", noop)
        };
        assert_eq!(
            command_help_text(&command, "~", &Default::default()),
            "**`~remind <when> [text]`**
Aliases: `r`

Reminds you of something

The reminder is sent as a DM.

```
Arguments:
  when   (required) Delay
  text   (optional)

Flags:
  -silent, -s

Examples:
  ~remind 1h30m stretch
```"
        );

        let config = HelpConfiguration {
            include_description: false,
            ..Default::default()
        };
        let text = command_help_text(&command, "~", &config);
        assert!(!text.contains("Reminds you"));
        assert!(text.contains("The reminder is sent as a DM."));
    }

    #[test]
    fn test_command_help_text_subcommands() {
        let commands = commands();
        assert_eq!(
            command_help_text(&commands[3], "~", &Default::default()),
            "**`~tag`**

Manage tags

```
Subcommands:
  ~tag add <name>, <content>   Creates a tag
```"
        );
        assert_eq!(
            command_help_text(&commands[1], "~", &Default::default()),
            "**`~ping`**\n\nPong"
        );
    }

    #[test]
    fn test_help_text_hides_hidden_commands() {
        let commands = commands();
        let config = HelpConfiguration::default();

        assert!(help_text(&commands, Some(" ping "), "~", &config).starts_with("**`~ping`**"));
        assert!(help_text(&commands, Some("tag add"), "~", &config).starts_with("**`~tag add"));
        assert!(help_text(&commands, None, "~", &config).starts_with("```"));
        for &name in &["secret", "tag purge", "nonexistent"] {
            assert_eq!(
                help_text(&commands, Some(name), "~", &config),
                format!("No such command `{}`", name)
            );
        }
    }
}
