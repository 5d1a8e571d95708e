use std::path::PathBuf;

use summary_core::{Classification, Msg, RequestId, SummaryOptions, SummaryType};

pub const HELP: &str = "\
Commands:
  add <path>...                 stage one or more files
  type <n> <classification>     unknown | report | presentation | spreadsheet
  remove <n>                    drop staged document n (later entries shift up)
  summary <type>                executive | technical | financial | none
  tables <on|off>               include extracted tables
  reset                         clear staged documents and summary type
  generate                      request a summary for the first staged document
  download <id>                 save a finished summary as summary.docx
  release <id>                  forget a finished summary
  show                          print the current state
  help                          print this text
  quit                          leave
Quote paths with spaces: add \"Q3 Report.pdf\"";

/// One line of terminal input, decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Msg),
    Generate,
    Show,
    Help,
    Quit,
}

/// Splits `line` with shell quoting rules, so `add "Q3 Report.pdf"` and
/// `add Q3\ Report.pdf` both name one file.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let words =
        shell_words::split(line).map_err(|err| format!("could not read {line:?}: {err}"))?;
    let Some((verb, rest)) = words.split_first() else {
        return Ok(Command::Dispatch(Msg::NoOp));
    };
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();

    let command = match verb.to_ascii_lowercase().as_str() {
        "add" => {
            if args.is_empty() {
                return Err("add needs at least one path".to_string());
            }
            Command::Dispatch(Msg::FilesSelected(
                args.iter().map(PathBuf::from).collect(),
            ))
        }
        "type" => {
            let [position, name] = args.as_slice() else {
                return Err("usage: type <n> <classification>".to_string());
            };
            let classification = Classification::parse(name)
                .ok_or_else(|| format!("unknown classification {name:?}"))?;
            Command::Dispatch(Msg::ClassificationChanged {
                index: parse_position(position)?,
                classification,
            })
        }
        "remove" => {
            let [position] = args.as_slice() else {
                return Err("usage: remove <n>".to_string());
            };
            Command::Dispatch(Msg::DocumentRemoved {
                index: parse_position(position)?,
            })
        }
        "summary" => {
            let [name] = args.as_slice() else {
                return Err("usage: summary <executive|technical|financial|none>".to_string());
            };
            let summary_type = if name.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(
                    SummaryType::parse(name)
                        .ok_or_else(|| format!("unknown summary type {name:?}"))?,
                )
            };
            Command::Dispatch(Msg::SummaryTypeChanged(summary_type))
        }
        "tables" => {
            let include_tables = match args.as_slice() {
                [flag] if flag.eq_ignore_ascii_case("on") => true,
                [flag] if flag.eq_ignore_ascii_case("off") => false,
                _ => return Err("usage: tables <on|off>".to_string()),
            };
            Command::Dispatch(Msg::OptionsChanged(SummaryOptions { include_tables }))
        }
        "reset" => Command::Dispatch(Msg::ResetClicked),
        "generate" => Command::Generate,
        "download" => Command::Dispatch(Msg::DownloadClicked {
            request_id: parse_request_id(&args)?,
        }),
        "release" => Command::Dispatch(Msg::ReleaseClicked {
            request_id: parse_request_id(&args)?,
        }),
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command {other:?} (try `help`)")),
    };
    Ok(command)
}

/// Terminal positions are 1-based; staging indexes are 0-based.
fn parse_position(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) | Err(_) => Err(format!("expected a position starting at 1, got {raw:?}")),
        Ok(position) => Ok(position - 1),
    }
}

fn parse_request_id(args: &[&str]) -> Result<RequestId, String> {
    let [raw] = args else {
        return Err("expected exactly one request id".to_string());
    };
    raw.trim_start_matches('#')
        .parse::<RequestId>()
        .map_err(|_| format!("invalid request id {raw:?}"))
}
