//! The stack machine.
//!
//! Statements run strictly in order; imports splice the imported file's
//! lines (keeping their own positions) into the remaining input, exactly
//! where the `%` line sat. Every error is fatal and carries the position
//! of the statement that raised it.

use crate::loader::{resolve_name, ScriptLoader};
use crate::statement::{self, Statement};
use gfd_figure::registry::{self, ConstructionDef};
use gfd_figure::{Figure, ParamKind, Registry};
use gfd_infer::saturate;
use gfd_types::{ObjId, ScriptError, ScriptErrorKind};
use std::collections::{BTreeMap, BTreeSet};

/// One operand: a figure object or a check result.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Value {
    Obj(ObjId),
    Bool(bool),
}

#[derive(Debug, Clone)]
struct Macro {
    arity: usize,
    body: Vec<String>,
}

/// A line queued for evaluation, tagged with where it came from.
#[derive(Debug)]
struct SourceLine {
    file: String,
    number: u32,
    text: String,
}

/// Lines of one file in reverse order, so the work list pops them
/// front-first.
fn lines_of(file: &str, text: &str) -> Vec<SourceLine> {
    let mut lines: Vec<SourceLine> = text
        .lines()
        .enumerate()
        .map(|(i, line)| SourceLine {
            file: file.to_string(),
            number: (i + 1) as u32,
            text: line.to_string(),
        })
        .collect();
    lines.reverse();
    lines
}

/// Evaluates one script (plus its imports) against a fresh figure.
pub struct Evaluator<L: ScriptLoader> {
    loader: L,
    registry: Registry,
    fig: Figure,
    bound: Vec<String>,
    table: BTreeMap<String, ObjId>,
    macros: BTreeMap<String, Macro>,
    loaded: BTreeSet<String>,
    queries: Vec<bool>,
    synth: u32,
}

impl<L: ScriptLoader> Evaluator<L> {
    pub fn new(loader: L) -> Self {
        Self::with_figure(loader, Figure::new())
    }

    /// Deterministic RNG for scripts using the random generators.
    pub fn with_seed(loader: L, seed: u64) -> Self {
        Self::with_figure(loader, Figure::with_seed(seed))
    }

    fn with_figure(loader: L, fig: Figure) -> Self {
        Self {
            loader,
            registry: Registry::standard(),
            fig,
            bound: Vec::new(),
            table: BTreeMap::new(),
            macros: BTreeMap::new(),
            loaded: BTreeSet::new(),
            queries: Vec::new(),
            synth: 0,
        }
    }

    /// Run `entry` to completion, saturate the property store, and hand
    /// back the run's final state.
    pub fn run(mut self, entry: &str) -> Result<Evaluation, ScriptError> {
        let resolved = resolve_name(entry);
        let text = self.loader.load(&resolved).map_err(|reason| {
            let kind = ScriptErrorKind::LoadFailed {
                file: resolved.clone(),
                reason,
            };
            ScriptError::new(resolved.clone(), 0, kind)
        })?;
        self.loaded.insert(resolved.clone());
        let mut pending = lines_of(&resolved, &text);
        while let Some(line) = pending.pop() {
            if let Err(kind) = self.step(&line, &mut pending) {
                return Err(ScriptError::new(line.file, line.number, kind));
            }
        }
        saturate(&mut self.fig.store);
        Ok(Evaluation {
            figure: self.fig,
            bound: self.bound,
            table: self.table,
            queries: self.queries,
        })
    }

    fn step(
        &mut self,
        line: &SourceLine,
        pending: &mut Vec<SourceLine>,
    ) -> Result<(), ScriptErrorKind> {
        let Some(stmt) = statement::classify(&line.text)? else {
            return Ok(());
        };
        match stmt {
            Statement::Import(target) => {
                let resolved = resolve_name(&target);
                if !self.loaded.insert(resolved.clone()) {
                    // Covers true cycles and diamond re-imports alike:
                    // every file is loaded at most once.
                    return Err(ScriptErrorKind::DuplicateImport(resolved));
                }
                let text = self
                    .loader
                    .load(&resolved)
                    .map_err(|reason| ScriptErrorKind::LoadFailed {
                        file: resolved.clone(),
                        reason,
                    })?;
                pending.extend(lines_of(&resolved, &text));
                Ok(())
            }
            Statement::MacroDef { arity, name, body } => {
                // Later definitions shadow earlier ones.
                self.macros.insert(name, Macro { arity, body });
                Ok(())
            }
            Statement::Query(tokens) => {
                let stack = self.eval_tokens(&tokens)?;
                match stack[..] {
                    [Value::Bool(b)] => {
                        self.queries.push(b);
                        Ok(())
                    }
                    _ => Err(ScriptErrorKind::NonBooleanQuery),
                }
            }
            Statement::Construction { names, tokens } => {
                let results = self.eval_tokens(&tokens)?;
                if names.len() != results.len() {
                    return Err(ScriptErrorKind::ArityMismatch {
                        names: names.len(),
                        results: results.len(),
                    });
                }
                for (name, value) in names.into_iter().zip(results) {
                    if name == "." {
                        continue;
                    }
                    let Value::Obj(id) = value else {
                        return Err(ScriptErrorKind::BooleanBinding(name));
                    };
                    self.bind(name, id)?;
                }
                Ok(())
            }
        }
    }

    fn bind(&mut self, name: String, id: ObjId) -> Result<(), ScriptErrorKind> {
        if self.table.contains_key(&name) {
            return Err(ScriptErrorKind::Redefinition(name));
        }
        self.fig.arena.set_name(id, &name);
        self.table.insert(name.clone(), id);
        self.bound.push(name);
        Ok(())
    }

    fn eval_tokens(&mut self, tokens: &[String]) -> Result<Vec<Value>, ScriptErrorKind> {
        let mut stack = Vec::new();
        for token in tokens {
            self.apply(&mut stack, token)?;
        }
        Ok(stack)
    }

    /// Apply one token to the stack. Resolution order: construction
    /// function, check function, macro, bound object name.
    fn apply(&mut self, stack: &mut Vec<Value>, token: &str) -> Result<(), ScriptErrorKind> {
        let (name, star) = match token.strip_suffix('*') {
            Some(base) if !base.is_empty() => (base, true),
            _ => (token, false),
        };
        if let Some(def) = self.registry.construction(name) {
            return self.apply_construction(stack, def, star);
        }
        if let Some(def) = self.registry.check(name) {
            let args = self.pop_operands(stack, def.name, def.params)?;
            let holds = registry::run_check(&mut self.fig, def, &args);
            stack.push(Value::Bool(holds));
            return Ok(());
        }
        if let Some(mac) = self.macros.get(name).cloned() {
            return self.apply_macro(stack, name, &mac);
        }
        if let Some(&id) = self.table.get(name) {
            stack.push(Value::Obj(id));
            return Ok(());
        }
        Err(ScriptErrorKind::UnknownName(token.to_string()))
    }

    fn apply_construction(
        &mut self,
        stack: &mut Vec<Value>,
        def: &'static ConstructionDef,
        star: bool,
    ) -> Result<(), ScriptErrorKind> {
        let args = self.pop_operands(stack, def.name, def.params)?;
        let outputs = def.call(&mut self.fig, &args)?;
        for id in outputs {
            stack.push(Value::Obj(id));
            if star {
                let name = format!("__obj{:03}", self.synth);
                self.synth += 1;
                self.bind(name, id)?;
            }
        }
        Ok(())
    }

    /// Pop and kind-check one function's operands, leftmost argument
    /// deepest in the stack.
    fn pop_operands(
        &mut self,
        stack: &mut Vec<Value>,
        function: &str,
        params: &[ParamKind],
    ) -> Result<Vec<ObjId>, ScriptErrorKind> {
        if stack.len() < params.len() {
            return Err(ScriptErrorKind::StackUnderflow(function.to_string()));
        }
        let popped = stack.split_off(stack.len() - params.len());
        let mut args = Vec::with_capacity(popped.len());
        for (i, (value, &wanted)) in popped.into_iter().zip(params).enumerate() {
            let id = match value {
                Value::Obj(id) => id,
                Value::Bool(_) => {
                    return Err(ScriptErrorKind::BooleanOperand {
                        function: function.to_string(),
                        index: i + 1,
                    });
                }
            };
            let found = self.fig.arena.kind(id);
            if !wanted.matches(found) {
                return Err(ScriptErrorKind::WrongOperandKind {
                    function: function.to_string(),
                    index: i + 1,
                    expected: wanted.label().to_string(),
                    found,
                });
            }
            args.push(id);
        }
        Ok(args)
    }

    /// Expand a macro: pop its arguments, substitute their display names
    /// for `$i` placeholders, and evaluate the body in place.
    fn apply_macro(
        &mut self,
        stack: &mut Vec<Value>,
        name: &str,
        mac: &Macro,
    ) -> Result<(), ScriptErrorKind> {
        if stack.len() < mac.arity {
            return Err(ScriptErrorKind::StackUnderflow(name.to_string()));
        }
        let popped = stack.split_off(stack.len() - mac.arity);
        let mut args = Vec::with_capacity(mac.arity);
        for (i, value) in popped.into_iter().enumerate() {
            match value {
                Value::Obj(id) => args.push(self.fig.name(id)),
                Value::Bool(_) => {
                    return Err(ScriptErrorKind::BooleanOperand {
                        function: name.to_string(),
                        index: i + 1,
                    });
                }
            }
        }
        for token in &mac.body {
            let substituted = match token.strip_prefix('$') {
                Some(rest) => {
                    let arg = rest
                        .parse::<usize>()
                        .ok()
                        .and_then(|i| i.checked_sub(1))
                        .and_then(|i| args.get(i))
                        .ok_or_else(|| ScriptErrorKind::BadPlaceholder(token.clone()))?;
                    arg.as_str()
                }
                None => token.as_str(),
            };
            self.apply(stack, substituted)?;
        }
        Ok(())
    }
}

/// The final state of one run.
#[derive(Debug)]
pub struct Evaluation {
    pub figure: Figure,
    bound: Vec<String>,
    table: BTreeMap<String, ObjId>,
    pub queries: Vec<bool>,
}

impl Evaluation {
    /// Bound names in binding order, synthetic `*` bindings included.
    pub fn bound_names(&self) -> impl Iterator<Item = &str> {
        self.bound.iter().map(String::as_str)
    }

    pub fn lookup(&self, name: &str) -> Option<ObjId> {
        self.table.get(name).copied()
    }
}
