//! Line-oriented batch balancing for the CLI frontend.
//!
//! Each equation is balanced independently: a result goes to the output
//! stream, a failure goes to the error stream as `error: <message>`, and
//! processing continues with the next equation.

use std::io::{self, BufRead, Write};

use crate::balancer::EquationBalancer;
use crate::error::{BalanceError, Result};

/// Outcome counts of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Equations balanced successfully
    pub balanced: usize,
    /// Equations that failed to parse or balance
    pub failed: usize,
}

impl BatchSummary {
    /// True if no equation failed.
    pub fn all_balanced(&self) -> bool {
        self.failed == 0
    }
}

fn output_error(e: io::Error) -> BalanceError {
    BalanceError::OutputError {
        message: e.to_string(),
    }
}

/// Balance one equation and report it. Blank input is ignored.
pub fn balance_line<W: Write, E: Write>(
    balancer: &EquationBalancer,
    line: &str,
    out: &mut W,
    err: &mut E,
    summary: &mut BatchSummary,
) -> Result<()> {
    let equation = line.trim();
    if equation.is_empty() {
        return Ok(());
    }

    match balancer.balance(equation) {
        Ok(balanced) => {
            writeln!(out, "{}", balanced).map_err(output_error)?;
            summary.balanced += 1;
        }
        Err(e) => {
            writeln!(err, "error: {}", e).map_err(output_error)?;
            summary.failed += 1;
        }
    }

    Ok(())
}

/// Balance every line of `input`.
pub fn process_lines<R: BufRead, W: Write, E: Write>(
    balancer: &EquationBalancer,
    input: R,
    out: &mut W,
    err: &mut E,
) -> Result<BatchSummary> {
    let mut summary = BatchSummary::default();

    for line in input.lines() {
        let line = line.map_err(|e| BalanceError::InputError {
            message: e.to_string(),
        })?;
        balance_line(balancer, &line, out, err, &mut summary)?;
    }

    out.flush().map_err(output_error)?;
    Ok(summary)
}

/// Balance each given equation, writing to stdout and stderr.
pub fn process_equations<S: AsRef<str>>(
    balancer: &EquationBalancer,
    equations: &[S],
) -> Result<BatchSummary> {
    let mut out = io::stdout().lock();
    let mut err = io::stderr().lock();
    let mut summary = BatchSummary::default();

    for equation in equations {
        balance_line(balancer, equation.as_ref(), &mut out, &mut err, &mut summary)?;
    }

    out.flush().map_err(output_error)?;
    Ok(summary)
}

/// Balance equations read from stdin, one per line.
pub fn process_stdin(balancer: &EquationBalancer) -> Result<BatchSummary> {
    let input = io::stdin().lock();
    let mut out = io::stdout().lock();
    let mut err = io::stderr().lock();
    process_lines(balancer, input, &mut out, &mut err)
}
