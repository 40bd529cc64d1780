use crate::core::error::StepError;
use console::style;
use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::FileHistory;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Config, Context, EditMode, Editor, Helper};
use std::path::PathBuf;

/// Completes slash commands and falls back to filesystem paths — which is
/// how photos get sent here.
pub struct StepHelper {
    filename_completer: FilenameCompleter,
    command_names: Vec<String>,
}

impl StepHelper {
    pub fn new(mut command_names: Vec<String>) -> Self {
        command_names.sort();
        Self {
            filename_completer: FilenameCompleter::new(),
            command_names,
        }
    }
}

impl Completer for StepHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        if line.starts_with('/') {
            let command_part = &line[1..pos];
            let matches: Vec<Pair> = self
                .command_names
                .iter()
                .filter(|cmd| cmd.starts_with(command_part))
                .map(|cmd| Pair {
                    display: format!("/{}", cmd),
                    replacement: cmd.clone(),
                })
                .collect();

            if !matches.is_empty() {
                return Ok((1, matches));
            }
        }

        self.filename_completer.complete(line, pos, ctx)
    }
}

impl Hinter for StepHelper {
    type Hint = String;
}

impl Highlighter for StepHelper {}
impl Validator for StepHelper {}
impl Helper for StepHelper {}

fn history_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".littlestep")
        .join("input_history.txt")
}

/// Creates a configured rustyline editor.
pub fn create_editor(command_names: Vec<String>) -> Result<Editor<StepHelper, FileHistory>, StepError> {
    let config = Config::builder()
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .edit_mode(EditMode::Emacs)
        .build();

    let mut editor = Editor::with_config(config)
        .map_err(|e| StepError::Input(format!("Failed to create line editor: {}", e)))?;
    editor.set_helper(Some(StepHelper::new(command_names)));

    let _ = editor.load_history(&history_path());
    Ok(editor)
}

/// Reads one line of input; `None` means the user is done (Ctrl-C/Ctrl-D).
pub fn read_input(
    editor: &mut Editor<StepHelper, FileHistory>,
) -> Result<Option<String>, StepError> {
    let prompt = style("📷 > ").bold().cyan().to_string();
    match editor.readline(&prompt) {
        Ok(line) => {
            if !line.trim().is_empty() {
                if let Err(e) = editor.add_history_entry(&line) {
                    return Err(StepError::Input(format!(
                        "Failed to add history entry: {}",
                        e
                    )));
                }
            }
            Ok(Some(line))
        }
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(err) => Err(StepError::Input(format!("Input error: {}", err))),
    }
}

/// Saves the editor history.
pub fn save_history(editor: &mut Editor<StepHelper, FileHistory>) -> Result<(), StepError> {
    let path = history_path();
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StepError::Input(format!("Failed to create history dir: {}", e)))?;
        }
    }

    editor
        .save_history(&path)
        .map_err(|e| StepError::Input(format!("Failed to save history: {}", e)))
}
