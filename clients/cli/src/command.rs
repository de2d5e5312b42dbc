use blackjack::CHIP_DENOMINATIONS;
use std::str::FromStr;
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  deal [amount]   start a round (uses the bet slip, or the default bet)
  hit | h         take a card
  stand | s       end your turn
  double | dd     double the bet and take exactly one card
  chip <value>    add a chip to the bet slip (50, 100, 500, 1000)
  unchip <value>  remove a chip from the bet slip
  clear           empty the bet slip
  topup           refill an empty balance
  stats           show session statistics
  help            show this list
  quit            leave the table";

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Deal(Option<u64>),
    Hit,
    Stand,
    Double,
    Chip(u64),
    Unchip(u64),
    Clear,
    TopUp,
    Stats,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`, type `help` for a list")]
    Unknown(String),
    #[error("`{0}` needs a chip value")]
    MissingAmount(&'static str),
    #[error("`{0}` is not a valid amount")]
    InvalidAmount(String),
    #[error("there is no {0} chip; chips are 50, 100, 500 and 1000")]
    UnknownChip(u64),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let word = words.next().ok_or(CommandError::Empty)?.to_ascii_lowercase();
        let amount = words.next().map(parse_amount).transpose()?;

        match word.as_str() {
            "deal" | "d" | "bet" => Ok(Command::Deal(amount)),
            "hit" | "h" => Ok(Command::Hit),
            "stand" | "s" => Ok(Command::Stand),
            "double" | "dd" => Ok(Command::Double),
            "chip" | "c" => chip(amount, "chip").map(Command::Chip),
            "unchip" | "u" => chip(amount, "unchip").map(Command::Unchip),
            "clear" => Ok(Command::Clear),
            "topup" | "refill" => Ok(Command::TopUp),
            "stats" => Ok(Command::Stats),
            "help" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(word)),
        }
    }
}

fn parse_amount(word: &str) -> Result<u64, CommandError> {
    word.parse()
        .map_err(|_| CommandError::InvalidAmount(word.to_string()))
}

fn chip(amount: Option<u64>, name: &'static str) -> Result<u64, CommandError> {
    let value = amount.ok_or(CommandError::MissingAmount(name))?;
    if CHIP_DENOMINATIONS.contains(&value) {
        Ok(value)
    } else {
        Err(CommandError::UnknownChip(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_actions() {
        assert_eq!("hit".parse(), Ok(Command::Hit));
        assert_eq!(" S ".parse(), Ok(Command::Stand));
        assert_eq!("dd".parse(), Ok(Command::Double));
        assert_eq!("quit".parse(), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_deal_amount() {
        assert_eq!("deal".parse(), Ok(Command::Deal(None)));
        assert_eq!("deal 250".parse(), Ok(Command::Deal(Some(250))));
        assert_eq!(
            "deal lots".parse::<Command>(),
            Err(CommandError::InvalidAmount("lots".into()))
        );
    }

    #[test]
    fn test_parse_chips() {
        assert_eq!("chip 500".parse(), Ok(Command::Chip(500)));
        assert_eq!("unchip 50".parse(), Ok(Command::Unchip(50)));
        assert_eq!(
            "chip 25".parse::<Command>(),
            Err(CommandError::UnknownChip(25))
        );
        assert_eq!(
            "chip".parse::<Command>(),
            Err(CommandError::MissingAmount("chip"))
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "split".parse::<Command>(),
            Err(CommandError::Unknown("split".into()))
        );
    }
}
