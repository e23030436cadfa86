use anyhow::{Result, bail};

/// A line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Register { username: String, first_name: String },
    /// `invite` alone opens the form; with a name it sends the invite.
    Invite(Option<String>),
    /// 1-based position in the streak list.
    Open(usize),
    Back,
    /// `send` alone retries the current draft.
    Send(Option<String>),
    Restore,
    Refresh,
    Check,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let arg = (!rest.is_empty()).then(|| rest.to_string());

        let command = match word.to_ascii_lowercase().as_str() {
            "register" => {
                let Some((username, first_name)) = rest.split_once(char::is_whitespace) else {
                    bail!("usage: register <username> <first name>");
                };
                Command::Register {
                    username: username.to_string(),
                    first_name: first_name.trim().to_string(),
                }
            }
            "invite" => Command::Invite(arg),
            "open" => match rest.parse::<usize>() {
                Ok(n) if n > 0 => Command::Open(n),
                _ => bail!("usage: open <number>"),
            },
            "back" => Command::Back,
            "send" => Command::Send(arg),
            "restore" => Command::Restore,
            "refresh" => Command::Refresh,
            "check" => Command::Check,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "" => bail!("type `help` for commands"),
            other => bail!("unknown command `{}`, type `help`", other),
        };
        Ok(command)
    }
}

pub const HELP: &str = "\
commands:
  register <username> <first name>   start a session
  invite [username]                   open the invite form / send an invite
  open <n>                            show streak number n
  send [text]                         message the open streak (no text: retry draft)
  restore                             revive the open streak
  back                                leave the open streak or the invite form
  refresh                             reload streaks
  check                               ask the service for lapsed streaks
  quit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_register_with_spaced_name() {
        assert_eq!(
            Command::parse("register alice  Alice Liddell").unwrap(),
            Command::Register {
                username: "alice".into(),
                first_name: "Alice Liddell".into()
            }
        );
        assert!(Command::parse("register alice").is_err());
    }

    #[test]
    fn optional_arguments() {
        assert_eq!(Command::parse("invite").unwrap(), Command::Invite(None));
        assert_eq!(
            Command::parse("INVITE bob").unwrap(),
            Command::Invite(Some("bob".into()))
        );
        assert_eq!(Command::parse(" send ").unwrap(), Command::Send(None));
        assert_eq!(
            Command::parse("send see you tomorrow").unwrap(),
            Command::Send(Some("see you tomorrow".into()))
        );
    }

    #[test]
    fn open_needs_positive_index() {
        assert_eq!(Command::parse("open 2").unwrap(), Command::Open(2));
        assert!(Command::parse("open 0").is_err());
        assert!(Command::parse("open x").is_err());
    }

    #[test]
    fn rejects_unknown_and_blank() {
        assert!(Command::parse("dance").is_err());
        assert!(Command::parse("   ").is_err());
    }
}
