use std::path::PathBuf;

use quickdocs_core::{Msg, UploadPayload};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Dispatch(Msg),
    ShowAddress,
    Help,
    Quit,
    Unknown(String),
}

/// Maps one line of terminal input to a session message or a local command.
/// Anything not starting with `/` is a chat message; a leading `//` sends the
/// rest as a message starting with `/`.
pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    if let Some(escaped) = trimmed.strip_prefix("//") {
        return Command::Dispatch(Msg::MessageSubmitted(format!("/{escaped}")));
    }
    if !trimmed.starts_with('/') {
        return Command::Dispatch(Msg::MessageSubmitted(trimmed.to_string()));
    }

    let (name, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (trimmed, ""),
    };

    match name {
        "/upload" => Command::Dispatch(Msg::UploadRequested(UploadPayload::File(PathBuf::from(
            strip_quotes(rest),
        )))),
        "/text" => Command::Dispatch(Msg::UploadRequested(UploadPayload::Text(rest.to_string()))),
        "/server" if rest.is_empty() => Command::ShowAddress,
        "/server" => Command::Dispatch(Msg::BackendAddressSubmitted(rest.to_string())),
        "/status" => Command::Dispatch(Msg::StatusRefreshRequested),
        "/new" => Command::Dispatch(Msg::NewSessionRequested),
        "/help" => Command::Help,
        "/quit" | "/exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

/// Terminals wrap dropped file paths in quotes.
fn strip_quotes(raw: &str) -> &str {
    let quoted = raw.len() >= 2
        && ((raw.starts_with('"') && raw.ends_with('"'))
            || (raw.starts_with('\'') && raw.ends_with('\'')));
    if quoted {
        &raw[1..raw.len() - 1]
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_chat_message() {
        assert_eq!(
            parse_command("  what is covered?  \n"),
            Command::Dispatch(Msg::MessageSubmitted("what is covered?".to_string()))
        );
        assert_eq!(
            parse_command(""),
            Command::Dispatch(Msg::MessageSubmitted(String::new()))
        );
    }

    #[test]
    fn double_slash_sends_message_starting_with_slash() {
        assert_eq!(
            parse_command("//etc/hosts what is this?"),
            Command::Dispatch(Msg::MessageSubmitted("/etc/hosts what is this?".to_string()))
        );
    }

    #[test]
    fn upload_strips_quotes_from_path() {
        assert_eq!(
            parse_command("/upload '/tmp/my docs/policy.pdf'"),
            Command::Dispatch(Msg::UploadRequested(UploadPayload::File(PathBuf::from(
                "/tmp/my docs/policy.pdf"
            ))))
        );
    }

    #[test]
    fn text_keeps_inner_spacing() {
        assert_eq!(
            parse_command("/text Refunds  within 30 days"),
            Command::Dispatch(Msg::UploadRequested(UploadPayload::Text(
                "Refunds  within 30 days".to_string()
            )))
        );
    }

    #[test]
    fn server_without_argument_shows_address() {
        assert_eq!(parse_command("/server"), Command::ShowAddress);
        assert_eq!(
            parse_command("/server http://10.0.0.5:8000"),
            Command::Dispatch(Msg::BackendAddressSubmitted("http://10.0.0.5:8000".to_string()))
        );
    }

    #[test]
    fn local_commands() {
        assert_eq!(parse_command("/new"), Command::Dispatch(Msg::NewSessionRequested));
        assert_eq!(parse_command("/status"), Command::Dispatch(Msg::StatusRefreshRequested));
        assert_eq!(parse_command("/exit"), Command::Quit);
        assert_eq!(parse_command("/help"), Command::Help);
        assert_eq!(parse_command("/bogus x"), Command::Unknown("/bogus".to_string()));
    }
}
