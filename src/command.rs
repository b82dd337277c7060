//! Parsing of the interactive command line.

use thiserror::Error;

use crate::view::PanelKind;

pub const HELP: &str = "\
Commands:
  login <email> <password>
  signup <username> <email> <password>
  logout
  post <title> | <description>
  delete-post <post-id>
  comment <post-id> <text>
  delete-comment <comment-id>
  profile <additional-email> | <address> | <mobile>
  open <sign-in|sign-up|post|profile>
  close
  sync
  show
  help
  quit";

/// One user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login {
        email: String,
        password: String,
    },
    Signup {
        username: String,
        email: String,
        password: String,
    },
    Logout,
    Post {
        title: String,
        description: String,
    },
    DeletePost(i64),
    Comment {
        post_id: i64,
        text: String,
    },
    DeleteComment(i64),
    Profile {
        additional_email: String,
        address: String,
        mobile: String,
    },
    Open(PanelKind),
    Close,
    Sync,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("not a valid id: {0}")]
    InvalidId(String),
}

fn parse_id(raw: &str) -> Result<i64, CommandError> {
    raw.parse()
        .map_err(|_| CommandError::InvalidId(raw.to_string()))
}

/// Split `rest` on `|` into exactly `N` trimmed parts.
fn split_fields<const N: usize>(
    rest: &str,
    usage: &'static str,
) -> Result<[String; N], CommandError> {
    let parts: Vec<String> = rest.split('|').map(|p| p.trim().to_string()).collect();
    parts.try_into().map_err(|_| CommandError::Usage(usage))
}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown commands and malformed arguments.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (name, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(name, rest)| (name, rest.trim()));
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match name {
            "login" => match args.as_slice() {
                [email, password] => Self::Login {
                    email: (*email).to_string(),
                    password: (*password).to_string(),
                },
                _ => return Err(CommandError::Usage("login <email> <password>")),
            },
            "signup" => match args.as_slice() {
                [username, email, password] => Self::Signup {
                    username: (*username).to_string(),
                    email: (*email).to_string(),
                    password: (*password).to_string(),
                },
                _ => return Err(CommandError::Usage("signup <username> <email> <password>")),
            },
            "logout" => Self::Logout,
            "post" => {
                let [title, description] =
                    split_fields(rest, "post <title> | <description>")?;
                Self::Post { title, description }
            }
            "delete-post" => match args.as_slice() {
                [id] => Self::DeletePost(parse_id(id)?),
                _ => return Err(CommandError::Usage("delete-post <post-id>")),
            },
            "comment" => {
                let Some((id, text)) = rest.split_once(char::is_whitespace) else {
                    return Err(CommandError::Usage("comment <post-id> <text>"));
                };
                Self::Comment {
                    post_id: parse_id(id)?,
                    text: text.trim().to_string(),
                }
            }
            "delete-comment" => match args.as_slice() {
                [id] => Self::DeleteComment(parse_id(id)?),
                _ => return Err(CommandError::Usage("delete-comment <comment-id>")),
            },
            "profile" => {
                let [additional_email, address, mobile] =
                    split_fields(rest, "profile <additional-email> | <address> | <mobile>")?;
                Self::Profile {
                    additional_email,
                    address,
                    mobile,
                }
            }
            "open" => match args.as_slice() {
                ["sign-in"] => Self::Open(PanelKind::SignIn),
                ["sign-up"] => Self::Open(PanelKind::SignUp),
                ["post"] => Self::Open(PanelKind::Compose),
                ["profile"] => Self::Open(PanelKind::Profile),
                _ => return Err(CommandError::Usage("open <sign-in|sign-up|post|profile>")),
            },
            "close" => Self::Close,
            "sync" => Self::Sync,
            "show" => Self::Show,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line() {
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn test_login() {
        assert_eq!(
            Command::parse("login alice@example.com hunter2").unwrap(),
            Some(Command::Login {
                email: "alice@example.com".to_string(),
                password: "hunter2".to_string(),
            })
        );
        assert_eq!(
            Command::parse("login alice@example.com"),
            Err(CommandError::Usage("login <email> <password>"))
        );
    }

    #[test]
    fn test_post_splits_on_pipe() {
        assert_eq!(
            Command::parse("post My title | Some longer body text").unwrap(),
            Some(Command::Post {
                title: "My title".to_string(),
                description: "Some longer body text".to_string(),
            })
        );
        assert!(matches!(
            Command::parse("post no separator"),
            Err(CommandError::Usage(_))
        ));
    }

    #[test]
    fn test_comment_keeps_text_spaces() {
        assert_eq!(
            Command::parse("comment 12 nice post, thanks").unwrap(),
            Some(Command::Comment {
                post_id: 12,
                text: "nice post, thanks".to_string(),
            })
        );
    }

    #[test]
    fn test_invalid_id() {
        assert_eq!(
            Command::parse("delete-post abc"),
            Err(CommandError::InvalidId("abc".to_string()))
        );
    }

    #[test]
    fn test_profile_allows_empty_fields() {
        assert_eq!(
            Command::parse("profile alt@example.com | | 555").unwrap(),
            Some(Command::Profile {
                additional_email: "alt@example.com".to_string(),
                address: String::new(),
                mobile: "555".to_string(),
            })
        );
    }

    #[test]
    fn test_open_panel() {
        assert_eq!(
            Command::parse("open post").unwrap(),
            Some(Command::Open(PanelKind::Compose))
        );
    }

    #[test]
    fn test_unknown() {
        assert_eq!(
            Command::parse("dance"),
            Err(CommandError::Unknown("dance".to_string()))
        );
    }
}
