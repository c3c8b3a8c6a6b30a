//! Command argument parsing for the interactive session.

use crate::error::ArgError;

pub mod editing;

/// Sequential cursor over the whitespace-split arguments of one command.
///
/// Commands consume their arguments in order and call [`finish`] at the end
/// so that trailing arguments are reported instead of silently ignored.
///
/// [`finish`]: ArgCursor::finish
pub struct ArgCursor<'a> {
    args: &'a [&'a str],
    index: usize,
}

impl<'a> ArgCursor<'a> {
    /// Creates a cursor over the arguments following the command keyword.
    pub fn new(args: &'a [&'a str]) -> Self {
        Self { args, index: 0 }
    }

    /// Whether every argument has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.index >= self.args.len()
    }

    /// Fails with [`ArgError::TooMany`] when arguments are left over.
    pub fn finish(&self) -> Result<(), ArgError> {
        if self.is_exhausted() {
            Ok(())
        } else {
            Err(ArgError::TooMany)
        }
    }

    /// The next argument as a string.
    pub fn next_str(&mut self) -> Result<&'a str, ArgError> {
        let argument = self.args.get(self.index).ok_or(ArgError::TooFew)?;
        self.index += 1;
        Ok(argument)
    }

    /// The next argument as a base-10 integer.
    pub fn next_int(&mut self) -> Result<i64, ArgError> {
        let argument = self.next_str()?;
        argument
            .parse::<i64>()
            .map_err(|_| ArgError::NotAnInteger(argument.to_string()))
    }

    /// The next argument as a positive integer (at least one).
    pub fn next_positive(&mut self) -> Result<usize, ArgError> {
        let value = self.next_int()?;
        if value < 1 {
            return Err(ArgError::NotPositive(value));
        }
        Ok(value as usize)
    }

    /// The next argument as a non-negative integer.
    pub fn next_non_negative(&mut self) -> Result<usize, ArgError> {
        let value = self.next_int()?;
        if value < 0 {
            return Err(ArgError::Negative(value));
        }
        Ok(value as usize)
    }
}
