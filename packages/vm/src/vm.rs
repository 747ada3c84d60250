use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use rhai::{Dynamic, Engine, Scope, AST};

use crate::error::ScriptError;

type Globals = Rc<RefCell<HashMap<String, Dynamic>>>;

/// Expression nesting limits, top level and inside functions. These are the
/// engine's release defaults; debug builds would otherwise halve them.
const MAX_EXPR_DEPTH: usize = 64;
const MAX_FUNCTION_EXPR_DEPTH: usize = 32;

/// A script engine with state that lives across evaluations.
///
/// - Top-level variables stay in one [`Scope`].
/// - Functions defined by any evaluated unit stay callable from later units.
/// - Globals set with [`ScriptVm::set_global`] resolve by name everywhere,
///   including inside script functions, unless a local of the same name
///   shadows them.
///
/// # Example
///
/// ```rust
/// use hostlib_vm::ScriptVm;
///
/// let mut vm = ScriptVm::new();
/// vm.run("fn double(x) { x * 2 }", "command 1").unwrap();
/// let value = vm.run("double(21)", "command 2").unwrap();
/// assert_eq!(value.as_int().unwrap(), 42);
/// ```
pub struct ScriptVm {
    engine: Engine,
    scope: Scope<'static>,
    functions: AST,
    globals: Globals,
}

impl ScriptVm {
    pub fn new() -> Self {
        let globals: Globals = Rc::default();
        let mut engine = Engine::new();
        engine.set_max_expr_depths(MAX_EXPR_DEPTH, MAX_FUNCTION_EXPR_DEPTH);

        let resolver = Rc::clone(&globals);
        engine.on_var(move |name, _index, context| {
            if context.scope().contains(name) {
                return Ok(None);
            }
            Ok(resolver.borrow().get(name).cloned())
        });

        Self {
            engine,
            scope: Scope::new(),
            functions: AST::empty(),
            globals,
        }
    }

    /// Compile `source` without running it. `name` tags positions in error
    /// messages.
    pub fn compile(&self, source: &str, name: &str) -> Result<AST, ScriptError> {
        let mut ast = self.engine.compile_with_scope(&self.scope, source)?;
        ast.set_source(name);
        Ok(ast)
    }

    /// Evaluate a compiled unit and return the value of its last statement.
    ///
    /// The unit's function definitions are retained before it runs, so they
    /// survive even when evaluation fails.
    pub fn eval(&mut self, ast: &AST) -> Result<Dynamic, ScriptError> {
        let mut unit = self.functions.merge(ast);
        if let Some(source) = ast.source() {
            unit.set_source(source);
        }
        self.functions = unit.clone_functions_only();

        let value = self
            .engine
            .eval_ast_with_scope::<Dynamic>(&mut self.scope, &unit)?;
        Ok(value)
    }

    /// Compile then evaluate.
    pub fn run(&mut self, source: &str, name: &str) -> Result<Dynamic, ScriptError> {
        let ast = self.compile(source, name)?;
        self.eval(&ast)
    }

    /// Run a script file, named by its path in error messages.
    pub fn run_file(&mut self, path: impl AsRef<Path>) -> Result<Dynamic, ScriptError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "running script file");
        self.run(&source, &path.to_string_lossy())
    }

    /// Make `value` resolvable as `name` from any script code.
    pub fn set_global(
        &mut self,
        name: impl Into<String>,
        value: impl Clone + Send + Sync + 'static,
    ) {
        self.globals
            .borrow_mut()
            .insert(name.into(), Dynamic::from(value));
    }

    pub fn global(&self, name: &str) -> Option<Dynamic> {
        self.globals.borrow().get(name).cloned()
    }

    /// Names of every global, sorted.
    pub fn global_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.globals.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// For registering host functions and types.
    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn scope(&self) -> &Scope<'static> {
        &self.scope
    }

    pub fn scope_mut(&mut self) -> &mut Scope<'static> {
        &mut self.scope
    }
}

impl Default for ScriptVm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variables_persist_between_units() {
        let mut vm = ScriptVm::new();
        vm.run("let x = 40;", "command 1").map(drop).unwrap();
        let value = vm.run("x + 2", "command 2").unwrap();
        assert_eq!(value.as_int().unwrap(), 42);
    }

    #[test]
    fn functions_persist_between_units() {
        let mut vm = ScriptVm::new();
        vm.run("fn greet(name) { `hello ${name}` }", "command 1")
            .map(drop)
            .unwrap();
        vm.run("fn shout(name) { greet(name).to_upper() }", "command 2")
            .map(drop)
            .unwrap();

        let value = vm.run(r#"shout("world")"#, "command 3").unwrap();
        assert_eq!(value.into_string().unwrap(), "HELLO WORLD");
    }

    #[test]
    fn redefinition_replaces_function() {
        let mut vm = ScriptVm::new();
        vm.run("fn f() { 1 }", "command 1").map(drop).unwrap();
        vm.run("fn f() { 2 }", "command 2").map(drop).unwrap();
        assert_eq!(vm.run("f()", "command 3").unwrap().as_int().unwrap(), 2);
    }

    #[test]
    fn functions_kept_when_evaluation_fails() {
        let mut vm = ScriptVm::new();
        let err = vm
            .run(r#"fn kept() { 7 } throw "boom";"#, "command 1")
            .unwrap_err();
        assert!(!err.is_parse());
        assert_eq!(vm.run("kept()", "command 2").unwrap().as_int().unwrap(), 7);
    }

    #[test]
    fn parse_error_names_the_unit() {
        let vm = ScriptVm::new();
        let err = vm.compile("let x = ", "command 9").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn eval_error_is_not_a_parse_error() {
        let mut vm = ScriptVm::new();
        let err = vm.run("no_such_function()", "command 4").unwrap_err();
        assert!(!err.is_parse());
        assert!(err.to_string().contains("no_such_function"));
    }

    #[test]
    fn globals_resolve_inside_functions() {
        let mut vm = ScriptVm::new();
        vm.set_global("answer", 42_i64);
        let value = vm.run("fn get() { answer } get()", "command 1").unwrap();
        assert_eq!(value.as_int().unwrap(), 42);
        assert_eq!(vm.global_names(), vec!["answer"]);
    }

    #[test]
    fn locals_shadow_globals() {
        let mut vm = ScriptVm::new();
        vm.set_global("answer", 42_i64);
        let value = vm.run("let answer = 1; answer", "command 1").unwrap();
        assert_eq!(value.as_int().unwrap(), 1);

        let value = vm.run("fn get(answer) { answer } get(5)", "command 2").unwrap();
        assert_eq!(value.as_int().unwrap(), 5);
    }

    #[test]
    fn nesting_limits_match_in_every_profile() {
        let mut vm = ScriptVm::new();
        assert_eq!(vm.engine().max_expr_depth(), MAX_EXPR_DEPTH);
        assert_eq!(vm.engine().max_function_expr_depth(), MAX_FUNCTION_EXPR_DEPTH);

        let source = r#"
            fn make(rows) {
                #{
                    rows: rows,
                    pick: |n| {
                        if n >= 0 && n < this.rows.len() {
                            if type_of(this.rows[n]) == "array" { this.rows[n] } else { () }
                        } else {
                            ()
                        }
                    }
                }
            }
            let table = make([[1], [2]]);
            table.pick(1)[0]
        "#;
        let value = vm.run(source, "command 1").unwrap();
        assert_eq!(value.as_int().unwrap(), 2);
    }

    #[test]
    fn run_file_reports_missing_path() {
        let mut vm = ScriptVm::new();
        let err = vm.run_file("/definitely/not/here.rhai").unwrap_err();
        assert!(matches!(err, ScriptError::Read { .. }));
        assert!(err.to_string().contains("here.rhai"));
    }

    #[test]
    fn run_file_evaluates_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.rhai");
        std::fs::write(&path, "fn triple(x) { x * 3 }\nlet nine = triple(3);").unwrap();

        let mut vm = ScriptVm::new();
        vm.run_file(&path).map(drop).unwrap();
        assert_eq!(vm.run("nine", "command 1").unwrap().as_int().unwrap(), 9);
    }
}
