//! Interactive evaluation loop
//!
//! Each line is compiled and evaluated against a fresh copy of the session's
//! properties, so one line consuming a property never affects the next.

use fabric_constraint::{Environment, EvalContext, Expression};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::props::parse_prop;

const HELP: &str = "\
Enter a constraint expression to evaluate it, or a command:
  :primary            evaluate for the primary replica
  :secondary          evaluate for secondary replicas
  :set NAME=VALUE     define a property
  :unset NAME         remove a property
  :env                show the properties
  :help               show this message
  :quit               leave";

/// A parsed input line.
#[derive(Debug, PartialEq, Eq)]
enum Line {
    Blank,
    Primary,
    Secondary,
    Set(String, String),
    Unset(String),
    Env,
    Help,
    Quit,
    Eval(String),
}

fn parse_line(line: &str) -> Result<Line, String> {
    let line = line.trim();
    let Some(command) = line.strip_prefix(':') else {
        return Ok(if line.is_empty() {
            Line::Blank
        } else {
            Line::Eval(line.to_string())
        });
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    match (name, arg) {
        ("primary", "") => Ok(Line::Primary),
        ("secondary", "") => Ok(Line::Secondary),
        ("set", arg) => parse_prop(arg).map(|(n, v)| Line::Set(n, v)),
        ("unset", arg) if !arg.is_empty() => Ok(Line::Unset(arg.to_string())),
        ("env", "") => Ok(Line::Env),
        ("help", "") => Ok(Line::Help),
        ("quit" | "q" | "exit", "") => Ok(Line::Quit),
        _ => Err(format!("unknown command `:{}` (try :help)", command)),
    }
}

/// Session state between lines.
struct Session {
    env: Environment,
    ctx: EvalContext,
}

impl Session {
    fn prompt(&self) -> &'static str {
        if self.ctx.for_primary {
            "constraint[primary]> "
        } else {
            "constraint> "
        }
    }

    /// Handle one line. Returns `false` when the session should end.
    fn handle(&mut self, line: Line) -> bool {
        match line {
            Line::Blank => {}
            Line::Primary => self.ctx.for_primary = true,
            Line::Secondary => self.ctx.for_primary = false,
            Line::Set(name, value) => self.env.define(name, value),
            Line::Unset(name) => {
                if !self.env.remove(&name) {
                    println!("`{}` is not defined", name);
                }
            }
            Line::Env => {
                for (name, value) in self.env.iter() {
                    println!("{} = {}", name, value);
                }
            }
            Line::Help => println!("{}", HELP),
            Line::Quit => return false,
            Line::Eval(text) => println!("{}", self.evaluate(&text)),
        }
        true
    }

    fn evaluate(&self, text: &str) -> String {
        let expr = match Expression::build(text) {
            Ok(expr) => expr,
            Err(err) => return format!("parse error: {}", err),
        };

        let mut env = self.env.clone();
        let mut out = match expr.evaluate_with(&mut env, &self.ctx) {
            Ok(value) => format!("{}  ; {}", value, expr),
            Err(err) => format!("evaluation error: {}", err),
        };
        if let Some(policy) = expr.fault_domain_policy() {
            out.push_str(&format!("\nfault-domain policy: {}", policy));
        }
        if let Some(policy) = expr.placement_policy() {
            out.push_str(&format!("\nplacement policy: {}", policy));
        }
        if !env.is_empty() {
            out.push_str(&format!("\nunused: {}", env.remaining().join(", ")));
        }
        out
    }
}

/// Run the loop until `:quit`, end of input, or Ctrl-C.
pub fn run(env: Environment, ctx: EvalContext) -> anyhow::Result<()> {
    let mut editor = DefaultEditor::new()?;
    let mut session = Session { env, ctx };

    println!("fabric-constraint {} (:help for commands)", fabric_constraint::VERSION);
    loop {
        match editor.readline(session.prompt()) {
            Ok(input) => {
                let _ = editor.add_history_entry(input.as_str());
                match parse_line(&input) {
                    Ok(line) => {
                        if !session.handle(line) {
                            break;
                        }
                    }
                    Err(message) => println!("{}", message),
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}
