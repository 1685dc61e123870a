//! Answer collection: the fixed interview, a terminal collector and an answers file
//! loader for non-interactive runs.

use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use serde_json::{Map, Value};
use tracing::debug;

use crate::core::types::{AnswersRecord, Framework};

pub const GREETING: &str = "Out of the box I include Polymer Starter Kit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    Text,
    Confirm { default: bool },
    Checkbox { choices: &'static [Framework] },
}

/// One interview question. `name` is also the answers-file key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub name: &'static str,
    pub message: &'static str,
    pub kind: QuestionKind,
}

impl Question {
    /// Value used when the user gives no answer. `None` means the answer is required.
    fn default_value(&self) -> Option<Value> {
        match self.kind {
            QuestionKind::Text => None,
            QuestionKind::Confirm { default } => Some(Value::Bool(default)),
            QuestionKind::Checkbox { .. } => Some(Value::Array(Vec::new())),
        }
    }
}

/// The interview, in the order it is asked.
pub const QUESTIONS: &[Question] = &[
    Question {
        name: "appName",
        message: "What is the name of your app?",
        kind: QuestionKind::Text,
    },
    Question {
        name: "useFirebase",
        message: "Add Firebase integration?",
        kind: QuestionKind::Confirm { default: false },
    },
    Question {
        name: "frameworks",
        message: "Framework integrations?",
        kind: QuestionKind::Checkbox {
            choices: &Framework::ALL,
        },
    },
    Question {
        name: "useGWC",
        message: "Use Google Web Components?",
        kind: QuestionKind::Confirm { default: true },
    },
    Question {
        name: "useAnalytics",
        message: "Add Google Analytics?",
        kind: QuestionKind::Confirm { default: true },
    },
    Question {
        name: "includeWCT",
        message: "Would you like to include web-component-tester?",
        kind: QuestionKind::Confirm { default: true },
    },
    Question {
        name: "includeRecipes",
        message: "Would you like to include recipe docs?",
        kind: QuestionKind::Confirm { default: false },
    },
];

/// Anything that can produce an answers record.
pub trait AnswerSource {
    fn collect(&mut self) -> Result<AnswersRecord>;
}

/// Asks the interview over a line-oriented terminal.
pub struct TerminalCollector<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalCollector<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, question: &Question) -> Result<Value> {
        if let QuestionKind::Checkbox { choices } = question.kind {
            writeln!(self.output, "? {}", question.message)?;
            for (idx, choice) in choices.iter().enumerate() {
                writeln!(self.output, "  {}) {}", idx + 1, choice)?;
            }
        }

        loop {
            match question.kind {
                QuestionKind::Text => write!(self.output, "? {} ", question.message)?,
                QuestionKind::Confirm { default } => {
                    let hint = if default { "(Y/n)" } else { "(y/N)" };
                    write!(self.output, "? {} {hint} ", question.message)?;
                }
                QuestionKind::Checkbox { .. } => {
                    write!(self.output, "  select (names or numbers, empty for none): ")?;
                }
            }
            self.output.flush()?;

            let line = self.read_line(question.name)?;
            let reply = line.trim();
            let parsed = match question.kind {
                QuestionKind::Text => Some(Value::String(reply.to_string())),
                QuestionKind::Confirm { default } => parse_confirm(reply, default).map(Value::Bool),
                QuestionKind::Checkbox { choices } => parse_checkbox(reply, choices).map(|set| {
                    Value::Array(
                        set.into_iter()
                            .map(|f| Value::String(f.as_str().to_string()))
                            .collect(),
                    )
                }),
            };

            match parsed {
                Some(value) => return Ok(value),
                None => writeln!(self.output, ">> Please enter a valid answer")?,
            }
        }
    }

    fn read_line(&mut self, name: &str) -> Result<String> {
        let mut line = String::new();
        let n = self
            .input
            .read_line(&mut line)
            .with_context(|| format!("read answer for {name}"))?;
        if n == 0 {
            bail!("input closed before `{name}` was answered");
        }
        Ok(line)
    }
}

impl<R: BufRead, W: Write> AnswerSource for TerminalCollector<R, W> {
    fn collect(&mut self) -> Result<AnswersRecord> {
        writeln!(self.output, "{GREETING}")?;
        let mut values = Map::new();
        for question in QUESTIONS {
            let value = self.ask(question)?;
            debug!(question = question.name, answer = %value, "answered");
            values.insert(question.name.to_string(), value);
        }
        into_record(values)
    }
}

fn parse_confirm(reply: &str, default: bool) -> Option<bool> {
    match reply.to_ascii_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Parse a comma/space separated list of choice names or 1-based indices.
fn parse_checkbox(reply: &str, choices: &[Framework]) -> Option<Vec<Framework>> {
    let mut selected = Vec::new();
    for token in reply
        .split(|ch: char| ch == ',' || ch.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        let choice = match token.parse::<usize>() {
            Ok(idx) => choices.get(idx.checked_sub(1)?).copied(),
            Err(_) => Framework::from_name(token).filter(|f| choices.contains(f)),
        }?;
        if !selected.contains(&choice) {
            selected.push(choice);
        }
    }
    Some(selected)
}

/// Reads answers from a TOML file keyed by question name.
///
/// Absent keys take the interview defaults; `appName` is required.
pub struct FileAnswers<'a> {
    path: &'a Path,
}

impl<'a> FileAnswers<'a> {
    pub fn new(path: &'a Path) -> Self {
        Self { path }
    }
}

impl AnswerSource for FileAnswers<'_> {
    fn collect(&mut self) -> Result<AnswersRecord> {
        load_answers(self.path)
    }
}

/// Load an answers file (see [`FileAnswers`]).
pub fn load_answers(path: &Path) -> Result<AnswersRecord> {
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_answers(&contents).with_context(|| format!("parse answers {}", path.display()))
}

/// Parse answers from TOML text, filling defaults.
pub fn parse_answers(contents: &str) -> Result<AnswersRecord> {
    let table: toml::Table = toml::from_str(contents).context("parse toml")?;

    if let Some(unknown) = table
        .keys()
        .find(|key| !QUESTIONS.iter().any(|q| q.name == key.as_str()))
    {
        bail!("unknown answer `{unknown}`");
    }

    let mut values = Map::new();
    for question in QUESTIONS {
        let value = match table.get(question.name) {
            Some(value) => serde_json::to_value(value)
                .with_context(|| format!("convert answer `{}`", question.name))?,
            None => question
                .default_value()
                .ok_or_else(|| anyhow!("missing required answer `{}`", question.name))?,
        };
        values.insert(question.name.to_string(), value);
    }
    into_record(values)
}

fn into_record(values: Map<String, Value>) -> Result<AnswersRecord> {
    serde_json::from_value(Value::Object(values)).context("decode answers")
}
