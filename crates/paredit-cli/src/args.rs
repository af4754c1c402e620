use anyhow::{Context, Result, bail};
use paredit_engine::Operation;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Interactive {
        path: Option<PathBuf>,
    },
    Batch {
        input: Input,
        selection: (usize, usize),
        language: Option<String>,
        commands: Vec<Operation>,
        print_clipboard: bool,
    },
    ListCommands,
    Help,
}

pub fn usage(program: &str) -> String {
    format!(
        "Usage:
  {program} [FILE]                     edit FILE in the terminal
  {program} --batch FILE|- [OPTIONS] COMMAND...
                                       run commands over FILE (or stdin) and print the result
  {program} --list-commands            print every command identifier

Batch options:
  --cursor N[:M]     initial cursor, or selection from N to M (default 0)
  --lang ID          language id (default from the file extension, clojure for stdin)
  --print-clipboard  print the clipboard instead of the text

Commands are identifiers such as paredit.slurpSexpForward; the paredit. prefix is optional."
    )
}

/// Parse a command identifier, with or without its `paredit.` prefix.
pub fn parse_command(id: &str) -> Result<Operation> {
    let id = if id.starts_with("paredit.") {
        id.to_string()
    } else {
        format!("paredit.{id}")
    };
    Ok(id.parse()?)
}

fn parse_offset(value: &str) -> Result<usize> {
    value
        .parse()
        .with_context(|| format!("invalid offset '{value}'"))
}

fn parse_selection(value: &str) -> Result<(usize, usize)> {
    match value.split_once(':') {
        Some((anchor, cursor)) => Ok((parse_offset(anchor)?, parse_offset(cursor)?)),
        None => {
            let at = parse_offset(value)?;
            Ok((at, at))
        }
    }
}

/// Parse the full argument list, program name included.
pub fn parse_args(args: &[String]) -> Result<Invocation> {
    let mut batch_input = None;
    let mut selection = (0, 0);
    let mut language = None;
    let mut print_clipboard = false;
    let mut positional = Vec::new();

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Invocation::Help),
            "--list-commands" => return Ok(Invocation::ListCommands),
            "--batch" => {
                let value = iter.next().context("--batch needs a file or -")?;
                batch_input = Some(if value == "-" {
                    Input::Stdin
                } else {
                    Input::File(PathBuf::from(value))
                });
            }
            "--cursor" => {
                let value = iter.next().context("--cursor needs an offset")?;
                selection = parse_selection(value)?;
            }
            "--lang" => {
                let value = iter.next().context("--lang needs a language id")?;
                language = Some(value.clone());
            }
            "--print-clipboard" => print_clipboard = true,
            flag if flag.starts_with("--") => bail!("unknown option {flag}"),
            _ => positional.push(arg.clone()),
        }
    }

    match batch_input {
        Some(input) => {
            if positional.is_empty() {
                bail!("--batch needs at least one command");
            }
            let commands = positional
                .iter()
                .map(String::as_str)
                .map(parse_command)
                .collect::<Result<Vec<_>>>()?;
            Ok(Invocation::Batch {
                input,
                selection,
                language,
                commands,
                print_clipboard,
            })
        }
        None => match positional.as_slice() {
            [] => Ok(Invocation::Interactive { path: None }),
            [path] => Ok(Invocation::Interactive {
                path: Some(PathBuf::from(path)),
            }),
            _ => bail!("expected at most one file"),
        },
    }
}
