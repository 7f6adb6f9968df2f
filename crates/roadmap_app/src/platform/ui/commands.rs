use roadmap_core::Msg;

pub const HELP_TEXT: &str = "\
Commands:
  goal <text>   generate a roadmap for a career goal
  done <n>      mark step n complete (or incomplete again)
  export        export the roadmap as a PDF
  save          save the roadmap to your account
  share         share the roadmap
  dismiss       clear the current notice
  show          print the current screen
  help          print this text
  quit          exit";

/// Input from the terminal, already mapped onto the update loop.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Msg(Msg),
    Show,
    Help,
    Quit,
}

/// Parses one input line. Unknown commands print the help text.
pub fn parse_line(line: &str) -> Vec<AppEvent> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command.to_ascii_lowercase().as_str() {
        "" => Vec::new(),
        "goal" => vec![
            AppEvent::Msg(Msg::GoalInputChanged(rest.to_string())),
            AppEvent::Msg(Msg::GoalSubmitted),
        ],
        "done" => match rest.parse::<u32>() {
            Ok(number) => vec![AppEvent::Msg(Msg::StepToggled(number))],
            Err(_) => vec![AppEvent::Help],
        },
        "export" => vec![AppEvent::Msg(Msg::ExportClicked)],
        "save" => vec![AppEvent::Msg(Msg::SaveClicked)],
        "share" => vec![AppEvent::Msg(Msg::ShareClicked)],
        "dismiss" => vec![AppEvent::Msg(Msg::NoticeDismissed)],
        "show" => vec![AppEvent::Show],
        "quit" | "exit" => vec![AppEvent::Quit],
        _ => vec![AppEvent::Help],
    }
}
