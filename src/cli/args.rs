use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "sinister", version, author, about = "Track your Simple & Sinister kettlebell workouts")]
pub struct Cli {
    /// Backend base URL (defaults to config.toml, then http://localhost:8225)
    #[arg(long, global = true, env = "SINISTER_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log a workout
    Log(LogArgs),
    /// Show workout history, newest first
    List {
        /// Page to show (5 workouts per page, starting at 1)
        #[arg(long, default_value = "1")]
        page: usize,
    },
    /// Delete a workout by id
    Delete {
        /// Workout id as shown by `list`
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Show totals, averages and the current streak
    Stats,
    /// Show the training-consistency heatmap for a year
    Heatmap {
        /// Calendar year (defaults to the most recent year with workouts)
        #[arg(long)]
        year: Option<i32>,
    },
    /// Show the swing and get-up weight progression
    Progress {
        /// Hide the swing weight series
        #[arg(long)]
        no_swing: bool,
        /// Hide the get-up weight series
        #[arg(long)]
        no_getup: bool,
    },
    /// Show or set the display unit (kg or lbs)
    Units {
        /// kg | lbs
        unit: Option<String>,
    },
    /// Show or set the colour theme; `next` cycles
    Theme {
        /// purple | ocean | sunset | forest | cosmic | royal | next
        name: Option<String>,
    },
    /// Show or hide the history panel in the dashboard
    History {
        /// show | hide
        visibility: Option<String>,
    },
    /// Show where settings live and which backend is used
    Config {
        /// Store this backend URL in config.toml
        #[arg(long)]
        set_url: Option<String>,
    },
}

/// Form fields as typed. Anything unparseable falls back to a default
/// instead of failing.
#[derive(clap::Args, Debug, Default)]
pub struct LogArgs {
    /// Date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub date: Option<String>,
    /// Number of kettlebell swings
    #[arg(long, short = 's', default_value = "")]
    pub swings: String,
    /// Swing bell in kg
    #[arg(long, default_value = "16")]
    pub swing_weight: String,
    /// 2-handed | 1-handed
    #[arg(long, default_value = "2-handed")]
    pub swing_style: String,
    /// Standard | EMOM | Ladders | Clusters | Descending | Pyramid
    #[arg(long, default_value = "Standard")]
    pub swing_type: String,
    /// Get-up reps with the first bell
    #[arg(long, short = 'g', default_value = "")]
    pub getups: String,
    /// First get-up bell in kg
    #[arg(long, default_value = "16")]
    pub getup_weight: String,
    /// Get-up reps with the optional second bell
    #[arg(long, default_value = "")]
    pub getups2: String,
    /// Optional second get-up bell in kg
    #[arg(long, default_value = "")]
    pub getup_weight2: String,
    /// Standard | EMOM | Complex | "Heavy Single" | Alternating
    #[arg(long, default_value = "Standard")]
    pub getup_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_commands_parse_their_flags() {
        let cli = Cli::try_parse_from(["sinister", "delete", "3", "-y"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Delete { id: 3, yes: true })));

        let cli = Cli::try_parse_from(["sinister", "progress", "--no-getup"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Progress { no_swing: false, no_getup: true })
        ));

        let cli = Cli::try_parse_from(["sinister", "list"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::List { page: 1 })));
    }

    #[test]
    fn no_subcommand_launches_dashboard() {
        let cli = Cli::try_parse_from(["sinister"]).unwrap();
        assert!(cli.command.is_none());
    }
}
