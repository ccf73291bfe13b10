use rustyline::{DefaultEditor, error::ReadlineError};

use numeris_core::RoundingMode;

use crate::calc;

const DEFAULT_CONST_DIGITS: u32 = 34;

fn print_repl_help() {
    eprintln!("Enter `VALUE`, `OP VALUE` (sqrt, inverse, negate, magnitude, sign, exp, ln, sin, cos)");
    eprintln!("or `LHS OP RHS` (+ - * / ^) with spaces between tokens.");
    eprintln!("Commands: :const NAME [DIGITS] [-], :info VALUE, :constants, :help, :quit | :exit | :q");
}

#[derive(Debug, PartialEq)]
pub(crate) enum Command<'a> {
    Quit,
    Help,
    Constants,
    Const { name: &'a str, digits: u32, negative: bool },
    Info(&'a str),
}

pub(crate) fn parse_command(line: &str) -> anyhow::Result<Command<'_>> {
    let mut words = line.split_whitespace();
    let head = words.next().unwrap_or_default();
    let rest: Vec<&str> = words.collect();
    match (head, rest.as_slice()) {
        (":quit" | ":exit" | ":q", []) => Ok(Command::Quit),
        (":help", []) => Ok(Command::Help),
        (":constants", []) => Ok(Command::Constants),
        (":info", [value]) => Ok(Command::Info(*value)),
        (":const", [name, tail @ ..]) if tail.len() <= 2 => {
            let mut digits = DEFAULT_CONST_DIGITS;
            let mut negative = false;
            for word in tail {
                if *word == "-" {
                    negative = true;
                } else {
                    digits = word
                        .parse::<u32>()
                        .ok()
                        .filter(|digits| *digits > 0)
                        .ok_or_else(|| anyhow::anyhow!("digits must be a positive integer, got {word:?}"))?;
                }
            }
            Ok(Command::Const {
                name: *name,
                digits,
                negative,
            })
        }
        _ => Err(anyhow::anyhow!("Unknown command. Type :help for help.")),
    }
}

fn run_command(command: Command<'_>, json: bool) -> anyhow::Result<bool> {
    match command {
        Command::Quit => return Ok(false),
        Command::Help => print_repl_help(),
        Command::Constants => println!("{}", numeris_core::constant_names().join(" ")),
        Command::Const { name, digits, negative } => {
            let value = calc::constant(name, digits, RoundingMode::HalfEven, negative)?;
            print_result(&value, json)?;
        }
        Command::Info(value) => print_result(&calc::info(&calc::value(value)?), json)?,
    }
    Ok(true)
}

fn print_result<T: serde::Serialize + std::fmt::Display>(value: &T, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(value)?);
    } else {
        println!("{value}");
    }
    Ok(())
}

pub fn run(json: bool) -> anyhow::Result<()> {
    // In-memory line editor with history and arrow key support
    let mut rl = DefaultEditor::new()?;

    print_repl_help();

    loop {
        let line = match rl.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C: drop the line and prompt again
                eprintln!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!();
                return Ok(());
            }
            Err(e) => {
                eprintln!("Readline error: {}", e);
                continue;
            }
        };

        let src = line.trim();
        if src.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(src);

        if src.starts_with(':') {
            match parse_command(src).and_then(|command| run_command(command, json)) {
                Ok(true) => {}
                Ok(false) => return Ok(()),
                Err(e) => eprintln!("Error: {}", e),
            }
            continue;
        }

        match calc::evaluate_line(src) {
            Ok(outcome) => {
                if let Err(e) = print_result(&outcome, json) {
                    eprintln!("Error: {}", e);
                }
            }
            Err(e) => eprintln!("Error: {:#}", e),
        }
    }
}
