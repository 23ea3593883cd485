use std::str::FromStr;

use crate::error::{Error, ErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmd {
    Noop,
    NextMonth,
    PrevMonth,
    Today,
    Exit,
}

impl FromStr for Cmd {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "noop" => Ok(Cmd::Noop),
            "next_month" => Ok(Cmd::NextMonth),
            "prev_month" => Ok(Cmd::PrevMonth),
            "today" => Ok(Cmd::Today),
            "exit" => Ok(Cmd::Exit),
            _ => Err(Error::new(
                ErrorKind::ConfigParse,
                &format!("unknown command '{}'", s),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_names() {
        assert_eq!("next_month".parse::<Cmd>().unwrap(), Cmd::NextMonth);
        assert_eq!("exit".parse::<Cmd>().unwrap(), Cmd::Exit);
        assert!("NextMonth".parse::<Cmd>().is_err());
    }
}
