//! The source-to-value pipeline.
//!
//! An [`Engine`] owns a native registry and a depth limit; each `run`
//! builds a fresh root environment from the registry, so independent runs
//! share nothing and cannot interfere. The pipeline is: strip comments →
//! tokenize → read → evaluate the first top-level form.

use crate::atoms::{build_root_env, OutputSink, Registry};
use crate::diagnostics::BraqError;
use crate::runtime::eval::{evaluate, EvalContext};
use crate::runtime::value::Value;
use crate::syntax::reader::read_program;
use crate::syntax::strip_comments;
use crate::syntax::tokenizer::tokenize;

pub const DEFAULT_MAX_DEPTH: usize = 500;

pub struct Engine {
    registry: Registry,
    max_depth: usize,
}

impl Engine {
    pub fn new(registry: Registry) -> Engine {
        Engine {
            registry,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Engine {
        self.max_depth = max_depth;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Runs one source text to its final value. An empty program (no
    /// tokens after comment stripping) evaluates to nil.
    pub fn run(&self, source: &str, output: &mut dyn OutputSink) -> Result<Value, BraqError> {
        let cleaned = strip_comments(source);
        let tokens = tokenize(&cleaned);
        let Some(program) = read_program(&tokens) else {
            return Ok(Value::Nil);
        };
        let env = build_root_env(&self.registry);
        let mut ctx = EvalContext::new(output, self.max_depth);
        evaluate(&program, &env, &mut ctx)
    }
}

impl Default for Engine {
    fn default() -> Engine {
        Engine::new(Registry::standard())
    }
}
