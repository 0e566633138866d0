// src/core/arg_parser.rs

use crate::models::{DispatcherFlag, ToolKind};
use std::collections::BTreeSet;

/// Where the classifier currently is in the token stream. It only moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Dispatcher,
    ToolFlags,
    Positional,
}

/// The raw command line split into the three sequences `gm` cares about.
///
/// Every input token lands in exactly one of them, in its original order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArguments {
    /// `-g*` switches for `gm` itself.
    pub dispatcher_flags: BTreeSet<DispatcherFlag>,
    /// Flags (and their values) meant for the build tool.
    pub tool_args: Vec<String>,
    /// Goals/tasks and everything after them.
    pub positional_args: Vec<String>,
}

impl ParsedArguments {
    /// Classifies `tokens` in a single left-to-right pass.
    ///
    /// # Logic:
    /// - Leading `-xx` tokens whose code is a known dispatcher flag are consumed
    ///   as dispatcher flags.
    /// - The first other token opens the tool-flag region. There, a token
    ///   starting with `-` is a tool flag; when it has no `=`, the following
    ///   token is taken as its value unless that one starts with `-` too.
    /// - The first token in the tool-flag region that does not start with `-`
    ///   opens the positional region, which swallows everything left.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Self {
        let mut parsed = Self::default();
        let mut region = Region::Dispatcher;
        let mut iter = tokens.iter().map(AsRef::as_ref).peekable();

        while let Some(token) = iter.next() {
            if region == Region::Dispatcher {
                if let Some(flag) = token.strip_prefix('-').and_then(DispatcherFlag::from_code) {
                    parsed.dispatcher_flags.insert(flag);
                    continue;
                }
                region = Region::ToolFlags;
            }

            if region == Region::ToolFlags {
                if token.starts_with('-') {
                    parsed.tool_args.push(token.to_string());
                    if !token.contains('=')
                        && let Some(value) = iter.next_if(|next| !next.starts_with('-'))
                    {
                        parsed.tool_args.push(value.to_string());
                    }
                    continue;
                }
                region = Region::Positional;
            }

            parsed.positional_args.push(token.to_string());
        }

        log::debug!("Classified arguments: {:?}", parsed);
        parsed
    }

    /// Whether `flag` was among the leading dispatcher flags.
    pub fn has_flag(&self, flag: DispatcherFlag) -> bool {
        self.dispatcher_flags.contains(&flag)
    }

    /// The tools selected with `-gg`, `-gm`, `-gj`, `-gb` or `-ga`.
    pub fn forced_tools(&self) -> Vec<ToolKind> {
        self.dispatcher_flags
            .iter()
            .filter_map(|flag| flag.forced_tool())
            .collect()
    }

    /// The dispatcher flags that force a tool, in code order.
    pub fn forcing_flags(&self) -> Vec<DispatcherFlag> {
        self.dispatcher_flags
            .iter()
            .copied()
            .filter(|flag| flag.forced_tool().is_some())
            .collect()
    }

    /// Starts explicit-flag extraction over copies of the tool and positional sequences.
    pub fn remaining(&self) -> RemainingArgs {
        RemainingArgs {
            tool: self.tool_args.clone(),
            positional: self.positional_args.clone(),
        }
    }
}

/// Pulls the value of `flag` out of `args`, in either `flag value` or
/// `flag=value` form, and returns it together with the arguments that remain.
///
/// A flag at the very end with nothing after it does not count as found, and
/// `args` comes back untouched.
pub fn take_flag_value(flag: &str, args: Vec<String>) -> (Option<String>, Vec<String>) {
    let prefix = format!("{}=", flag);

    for (i, arg) in args.iter().enumerate() {
        if arg == flag {
            let Some(value) = args.get(i + 1).cloned() else {
                return (None, args);
            };
            let remaining = args
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i && *j != i + 1)
                .map(|(_, a)| a.clone())
                .collect();
            return (Some(value), remaining);
        }

        if let Some(value) = arg.strip_prefix(&prefix) {
            let value = value.to_string();
            let remaining = args
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, a)| a.clone())
                .collect();
            return (Some(value), remaining);
        }
    }

    (None, args)
}

/// Which sequences an explicit flag may appear in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagScope {
    /// Only among the tool flags.
    ToolOnly,
    /// Among the tool flags, then among the positional arguments.
    ToolThenPositional,
}

/// The tool and positional sequences, threaded through successive
/// explicit-flag extractions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemainingArgs {
    /// Tool flags not yet claimed by an extraction.
    pub tool: Vec<String>,
    /// Positional arguments not yet claimed by an extraction.
    pub positional: Vec<String>,
}

impl RemainingArgs {
    /// Tries each spelling in `flags` in order against the tool sequence, then
    /// (when `scope` allows) against the positional sequence. The first hit is
    /// removed and returned.
    pub fn take(self, flags: &[&str], scope: FlagScope) -> (Option<String>, Self) {
        let Self { mut tool, mut positional } = self;

        for flag in flags {
            let (value, rest) = take_flag_value(flag, tool);
            tool = rest;
            if value.is_some() {
                return (value, Self { tool, positional });
            }
        }

        if scope == FlagScope::ToolThenPositional {
            for flag in flags {
                let (value, rest) = take_flag_value(flag, positional);
                positional = rest;
                if value.is_some() {
                    return (value, Self { tool, positional });
                }
            }
        }

        (None, Self { tool, positional })
    }
}
