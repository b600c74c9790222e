use std::str::FromStr;

use thiserror::Error;
use tickertracker_core::Tab;

/// A quick-pick given either by its 1-based position or by symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PickTarget {
    Index(usize),
    Symbol(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Markets,
    Market(String),
    Ticker(String),
    Pick(PickTarget),
    Tab(Tab),
    Refresh,
    Chart,
    Show,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type 'help' for the list of commands")]
    Unknown(String),

    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("{0}")]
    InvalidTab(#[from] tickertracker_core::Error),

    #[error("Suggestions are numbered from 1")]
    ZeroIndex,
}

pub const HELP: &str = "\
Commands:
  markets                       list supported markets
  market <id>                   switch market (e.g. market INDIA)
  ticker <symbol>               look up a ticker; repeat to refresh
  pick <n|symbol>               pick a suggested ticker of the market
  tab <overview|news|insights>  switch the visible tab
  refresh                       fetch the current ticker again
  chart                         load and show the price history
  show                          redraw the current view
  help                          show this help
  quit                          exit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let Some(word) = parts.next() else {
            return Ok(Command::Show);
        };
        let argument = parts.next();

        let required = |command: &'static str, name: &'static str| {
            argument
                .map(str::to_string)
                .ok_or(CommandError::MissingArgument {
                    command,
                    argument: name,
                })
        };

        match word.to_ascii_lowercase().as_str() {
            "markets" => Ok(Command::Markets),
            "market" | "m" => required("market", "a market id").map(Command::Market),
            "ticker" | "t" => required("ticker", "a symbol").map(Command::Ticker),
            "pick" | "p" => {
                let target = required("pick", "a number or symbol")?;
                match target.parse::<usize>() {
                    Ok(0) => Err(CommandError::ZeroIndex),
                    Ok(index) => Ok(Command::Pick(PickTarget::Index(index))),
                    Err(_) => Ok(Command::Pick(PickTarget::Symbol(target))),
                }
            }
            "tab" => Ok(Command::Tab(required("tab", "a tab name")?.parse()?)),
            "overview" | "news" | "insights" => Ok(Command::Tab(word.parse()?)),
            "refresh" | "r" => Ok(Command::Refresh),
            "chart" | "c" => Ok(Command::Chart),
            "show" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}
