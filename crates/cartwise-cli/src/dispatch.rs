use cartwise_report::commands;
use cartwise_report::{ReportResult, SuccessEnvelope};

use crate::cli::{Cli, Commands, ConfigCommand};

pub fn dispatch(cli: &Cli) -> ReportResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Spending { from, to, .. } => {
            let from_value = from.as_ref().map(|value| value.as_str());
            let to_value = to.as_ref().map(|value| value.as_str());
            commands::spending::run(from_value, to_value)
        }
        Commands::Members { from, to, .. } => {
            let from_value = from.as_ref().map(|value| value.as_str());
            let to_value = to.as_ref().map(|value| value.as_str());
            commands::members::run(from_value, to_value)
        }
        Commands::Categories { from, to, .. } => {
            let from_value = from.as_ref().map(|value| value.as_str());
            let to_value = to.as_ref().map(|value| value.as_str());
            commands::categories::run(from_value, to_value)
        }
        Commands::Breakdown { from, to, .. } => {
            let from_value = from.as_ref().map(|value| value.as_str());
            let to_value = to.as_ref().map(|value| value.as_str());
            commands::breakdown::run(from_value, to_value)
        }
        Commands::Config { command } => match command {
            ConfigCommand::Show { .. } => commands::config_show::run(),
        },
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::{Commands, parse_from};

    #[test]
    fn every_report_command_parses_to_a_dispatchable_variant() {
        let cases: [(&[&str], fn(&Commands) -> bool); 5] = [
            (&["cartwise", "spending"], |command| {
                matches!(command, Commands::Spending { .. })
            }),
            (&["cartwise", "members"], |command| {
                matches!(command, Commands::Members { .. })
            }),
            (&["cartwise", "categories"], |command| {
                matches!(command, Commands::Categories { .. })
            }),
            (&["cartwise", "breakdown"], |command| {
                matches!(command, Commands::Breakdown { .. })
            }),
            (&["cartwise", "config", "show"], |command| {
                matches!(command, Commands::Config { .. })
            }),
        ];

        for (args, matches_variant) in cases {
            let parsed = parse_from(args.iter().copied());
            assert!(parsed.is_ok(), "failed to parse: {args:?}");
            if let Ok(cli) = parsed {
                assert!(matches_variant(&cli.command));
            }
        }
    }
}
