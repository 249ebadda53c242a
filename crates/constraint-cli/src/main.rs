//! Fabric constraint CLI
//!
//! Compile, check and interactively explore placement-constraint expressions.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod cli;
mod logging;
mod props;
mod repl;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use fabric_constraint::{EvalContext, Expression};
use tracing::debug;

use crate::cli::{Cli, Commands, PropArgs};

/// Exit code for a constraint that evaluated but was not satisfied.
const NOT_SATISFIED: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.trace);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::Parse { expr } => parse(&expr),
        Commands::Check {
            expr,
            primary,
            props,
        } => check(&expr, primary, cli.trace, &props),
        Commands::Repl { primary, props } => {
            let env = props::load_environment(&props)?;
            repl::run(env, EvalContext::with_primary(primary).with_trace(cli.trace))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn parse(text: &str) -> anyhow::Result<ExitCode> {
    let expr = Expression::build(text).with_context(|| format!("cannot compile `{}`", text))?;

    println!("expression:          {}", expr);
    println!("for primary:         {}", expr.for_primary());
    println!("fault-domain policy: {}", expr.fault_domain_policy().unwrap_or("-"));
    println!("placement policy:    {}", expr.placement_policy().unwrap_or("-"));
    Ok(ExitCode::SUCCESS)
}

fn check(text: &str, primary: bool, trace: bool, props: &PropArgs) -> anyhow::Result<ExitCode> {
    let expr = Expression::build(text).with_context(|| format!("cannot compile `{}`", text))?;
    let mut env = props::load_environment(props)?;
    debug!(properties = env.len(), primary, "checking constraint");

    let ctx = EvalContext::with_primary(primary).with_trace(trace);
    let value = expr
        .evaluate_with(&mut env, &ctx)
        .with_context(|| format!("cannot evaluate `{}`", expr))?;

    println!("{}", value);
    if !env.is_empty() {
        println!("unused: {}", env.remaining().join(", "));
    }

    Ok(if value.is_truthy() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(NOT_SATISFIED)
    })
}
