// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine module for commit validation.
//!
//! Rule declarations from the configuration are compiled into a [`RuleSet`],
//! which [`evaluate`] and [`RuleEngine`] apply to commit messages.

mod builtin;
mod case;
mod engine;
mod ruleset;
mod validator;

pub use builtin::*;
pub use case::Case;
pub use engine::{evaluate, RuleEngine};
pub use ruleset::{RuleDeclaration, RuleSet};
pub use validator::{Finding, ValidationResult};
