use crate::cli::{Commands, ConfigCommand};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    let json = match command {
        Commands::Spending { json, .. }
        | Commands::Members { json, .. }
        | Commands::Categories { json, .. }
        | Commands::Breakdown { json, .. } => *json,
        Commands::Config { command } => match command {
            ConfigCommand::Show { json } => *json,
        },
    };

    if json { OutputMode::Json } else { OutputMode::Text }
}

#[cfg(test)]
mod tests {
    use super::{OutputMode, mode_for_command};
    use crate::cli::parse_from;

    #[test]
    fn json_flag_selects_json_output_per_command() {
        let cases: [&[&str]; 5] = [
            &["cartwise", "spending", "--json"],
            &["cartwise", "members", "--json"],
            &["cartwise", "categories", "--json"],
            &["cartwise", "breakdown", "--json"],
            &["cartwise", "config", "show", "--json"],
        ];

        for args in cases {
            let parsed = parse_from(args.iter().copied());
            assert!(parsed.is_ok(), "failed to parse: {args:?}");
            if let Ok(cli) = parsed {
                assert_eq!(mode_for_command(&cli.command), OutputMode::Json);
            }
        }
    }

    #[test]
    fn text_is_the_default_output_mode() {
        let parsed = parse_from(["cartwise", "members"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert_eq!(mode_for_command(&cli.command), OutputMode::Text);
        }
    }
}
