//! Rhai Console Environment
//!
//! [`RhaiConsole`] evaluates console submissions against a persistent scope and
//! reports everything the user should see over a channel.
//!
//! ## Globals
//!
//! - `log(msg)` - Write `[Rhai] msg` to the console and the application log
//! - `hello(name)` - Print a greeting
//! - `Console` - The [`ConsoleInfo`] host object
//! - Every `let` binding and `fn` definition from earlier submissions

use super::foreign::{ForeignObject, HostObject};
use super::host::ConsoleInfo;
use super::{ConsoleEnvironment, ConsoleOutput, OutputKind};
use crate::completion::Namespace;
use crate::config::ScriptLimits;
use crate::error::{ConsoleError, Result};
use crossbeam_channel::{unbounded, Receiver, Sender};
use rhai::{Dynamic, Engine, EvalAltResult, FnPtr, Map, Scope, AST};
use std::sync::Arc;

/// Host functions registered on every engine
const HOST_FUNCTIONS: [&str; 2] = ["log", "hello"];

/// Console environment backed by a Rhai engine
pub struct RhaiConsole {
    engine: Engine,
    /// Variables that survive between submissions
    scope: Scope<'static>,
    /// Script functions defined by earlier submissions
    functions: AST,
    /// Host objects, re-installed into the scope on reset
    objects: Vec<(String, ForeignObject)>,
    output: Sender<ConsoleOutput>,
}

impl RhaiConsole {
    /// Create a console with the built-in `Console` object installed
    pub fn new(limits: &ScriptLimits) -> (Self, Receiver<ConsoleOutput>) {
        let (tx, rx) = unbounded();
        let mut engine = Engine::new();
        Self::configure_engine(&mut engine, limits, tx.clone());

        let mut console = Self {
            engine,
            scope: Scope::new(),
            functions: AST::empty(),
            objects: Vec::new(),
            output: tx,
        };
        console.register_object(ConsoleInfo::NAME, Arc::new(ConsoleInfo::new()));

        tracing::info!("Rhai console initialized");
        (console, rx)
    }

    /// Configure the Rhai engine with host functions and safety limits
    fn configure_engine(engine: &mut Engine, limits: &ScriptLimits, output: Sender<ConsoleOutput>) {
        // Set safety limits
        engine.set_max_expr_depths(limits.max_expr_depth, limits.max_function_expr_depth);
        engine.set_max_call_levels(limits.max_call_levels);
        engine.set_max_operations(limits.max_operations);
        engine.set_max_string_size(limits.max_string_size);
        engine.set_max_array_size(limits.max_array_size);
        engine.set_max_map_size(limits.max_map_size);

        ForeignObject::register(engine);

        {
            let tx = output.clone();
            engine.on_print(move |text| {
                let _ = tx.send(ConsoleOutput::new(OutputKind::Print, text));
            });
        }
        {
            let tx = output.clone();
            engine.on_debug(move |text, source, pos| {
                let text = match source {
                    Some(source) => format!("[{}] {} @ {:?}", source, text, pos),
                    None => format!("{} @ {:?}", text, pos),
                };
                let _ = tx.send(ConsoleOutput::new(OutputKind::Print, text));
            });
        }

        // log(msg): echo into the console and the application log
        {
            let tx = output.clone();
            engine.register_fn("log", move |msg: Dynamic| {
                tracing::info!(target: "rhai_console::script", "{}", msg);
                let _ = tx.send(ConsoleOutput::new(OutputKind::Print, format!("[Rhai] {}", msg)));
            });
        }
        {
            let tx = output;
            engine.register_fn("hello", move |name: Dynamic| {
                let _ = tx.send(ConsoleOutput::new(OutputKind::Print, format!("Hello, {}", name)));
            });
        }
    }

    /// Expose a host object to scripts under `name`
    ///
    /// The object survives [`reset`](ConsoleEnvironment::reset). Registering a name
    /// again replaces the earlier object.
    pub fn register_object(&mut self, name: impl Into<String>, object: Arc<dyn HostObject>) {
        let name = name.into();
        let object = ForeignObject::new(object);
        object.register_methods(&mut self.engine);

        self.objects.retain(|(existing, _)| *existing != name);
        self.objects.push((name.clone(), object.clone()));
        self.scope.push(name, object);
    }

    /// Evaluate `input`, keeping its bindings and function definitions
    pub fn eval(&mut self, input: &str) -> std::result::Result<Dynamic, Box<EvalAltResult>> {
        let ast = self.engine.compile_with_scope(&self.scope, input)?;
        let ast = self.functions.merge(&ast);
        let value = self
            .engine
            .eval_ast_with_scope::<Dynamic>(&mut self.scope, &ast)?;
        self.functions = ast.clone_functions_only();
        Ok(value)
    }

    /// Names of variables currently in scope, latest binding last
    pub fn variable_names(&self) -> Vec<String> {
        self.scope.iter().map(|(name, _, _)| name.to_string()).collect()
    }

    /// Names of callable globals: host functions and script-defined functions
    pub fn function_names(&self) -> Vec<String> {
        HOST_FUNCTIONS
            .iter()
            .map(|f| f.to_string())
            .chain(self.functions.iter_functions().map(|f| f.name.to_string()))
            .collect()
    }

    fn emit(&self, kind: OutputKind, text: impl Into<String>) {
        if self.output.send(ConsoleOutput::new(kind, text)).is_err() {
            tracing::debug!("Console output dropped: receiver disconnected");
        }
    }

    fn install_objects(&mut self) {
        for (name, object) in &self.objects {
            self.scope.push(name.clone(), object.clone());
        }
    }
}

/// Text shown for an evaluation result
pub(crate) fn format_value(value: &Dynamic) -> String {
    match value.clone().try_cast::<ForeignObject>() {
        Some(obj) => obj.to_string(),
        None => value.to_string(),
    }
}

impl ConsoleEnvironment for RhaiConsole {
    fn execute(&mut self, input: &str) -> Result<()> {
        if input.trim().is_empty() {
            return Ok(());
        }

        match self.eval(input) {
            Ok(value) => {
                if !value.is_unit() {
                    self.emit(OutputKind::Result, format_value(&value));
                }
                Ok(())
            }
            Err(err) => {
                tracing::debug!("Console input failed: {}", err);
                self.emit(OutputKind::Error, format!("Error: {}", err));
                Err(ConsoleError::from_rhai_error(err))
            }
        }
    }

    fn reset(&mut self) {
        self.scope.clear();
        self.functions = AST::empty();
        self.install_objects();
        tracing::info!("Rhai console reset");
    }
}

impl Namespace for RhaiConsole {
    fn root(&self) -> Map {
        let mut root = Map::new();

        for name in self.function_names() {
            match FnPtr::new(name.as_str()) {
                Ok(ptr) => {
                    root.insert(name.into(), Dynamic::from(ptr));
                }
                Err(err) => tracing::debug!("Skipping function {:?} in namespace: {}", name, err),
            }
        }

        // Later bindings shadow earlier ones, as in the scope itself
        for (name, _, value) in self.scope.iter() {
            root.insert(name.into(), value);
        }

        root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::Suggestor;
    use crate::scripting::MockHostObject;

    fn console() -> (RhaiConsole, Receiver<ConsoleOutput>) {
        RhaiConsole::new(&ScriptLimits::default())
    }

    fn texts(rx: &Receiver<ConsoleOutput>) -> Vec<String> {
        rx.try_iter().map(|o| o.display_text()).collect()
    }

    #[test]
    fn test_result_is_reported() {
        let (mut console, rx) = console();
        console.execute("40 + 2").unwrap();
        assert_eq!(texts(&rx), vec!["=> 42"]);
    }

    #[test]
    fn test_unit_result_is_silent() {
        let (mut console, rx) = console();
        console.execute("let x = 1;").unwrap();
        console.execute("   ").unwrap();
        assert!(texts(&rx).is_empty());
    }

    #[test]
    fn test_bindings_persist() {
        let (mut console, rx) = console();
        console.execute("let x = 20;").unwrap();
        console.execute("fn twice(v) { v * 2 }").unwrap();
        console.execute("twice(x) + 2").unwrap();
        assert_eq!(texts(&rx), vec!["=> 42"]);
    }

    #[test]
    fn test_error_is_reported_and_returned() {
        let (mut console, rx) = console();
        let err = console.execute("undefined_thing + 1").unwrap_err();
        assert!(matches!(err, ConsoleError::Script(_)));

        let out: Vec<_> = rx.try_iter().collect();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, OutputKind::Error);
        assert!(out[0].text.starts_with("Error: "));
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let (mut console, rx) = console();
        assert!(console.execute("let = ;").is_err());
        assert!(texts(&rx)[0].starts_with("Error: "));
    }

    #[test]
    fn test_host_functions() {
        let (mut console, rx) = console();
        console.execute("log(\"ready\"); hello(\"world\"); print(\"p\");").unwrap();
        assert_eq!(texts(&rx), vec!["[Rhai] ready", "Hello, world", "p"]);
    }

    #[test]
    fn test_operation_limit() {
        let limits = ScriptLimits {
            max_operations: 1_000,
            ..ScriptLimits::default()
        };
        let (mut console, _rx) = RhaiConsole::new(&limits);
        assert!(console.execute("loop {}").is_err());
    }

    #[test]
    fn test_builtin_console_object() {
        let (mut console, rx) = console();
        console.execute("Console.version").unwrap();
        console.execute("Console.invoke(\"echo\", [\"a\", 1])").unwrap();
        console.execute("Console").unwrap();
        assert_eq!(
            texts(&rx),
            vec![
                format!("=> {}", env!("CARGO_PKG_VERSION")),
                "=> a 1".to_string(),
                "=> <Console>".to_string(),
            ]
        );
    }

    #[test]
    fn test_reset_keeps_host_objects() {
        let (mut console, _rx) = console();
        console.execute("let x = 1; fn f() { 1 }").unwrap();
        console.reset();

        assert!(console.execute("x").is_err());
        assert!(console.execute("f()").is_err());
        assert!(console.execute("Console.version").is_ok());
        assert!(!console.root().contains_key("x"));
        assert!(!console.root().contains_key("f"));
    }

    #[test]
    fn test_root_lists_globals() {
        let (mut console, _rx) = console();
        console.execute("let answer = 42; fn greet() { 0 }").unwrap();

        let root = console.root();
        for name in ["log", "hello", "Console", "answer", "greet"] {
            assert!(root.contains_key(name), "missing {}", name);
        }
    }

    #[test]
    fn test_every_console_member_is_usable() {
        let (mut console, rx) = console();
        let members = Suggestor::new(&console).get_suggestions("Console.e", 9);
        assert_eq!(members, vec!["echo"]);

        let info = ConsoleInfo::new();
        for member in info.member_names() {
            console
                .execute(&format!("Console.{}", member))
                .unwrap_or_else(|e| panic!("Console.{} failed: {}", member, e));
        }
        texts(&rx);

        console.execute("Console.echo(\"hi\", 2)").unwrap();
        console.execute("Console.echo()").unwrap();
        console.execute("let shout = Console.echo; shout.call(\"hey\")").unwrap();
        assert_eq!(texts(&rx), vec!["=> hi 2", "=> ", "=> hey"]);

        // Methods survive a reset
        console.reset();
        console.execute("Console.echo(\"again\")").unwrap();
        assert_eq!(texts(&rx), vec!["=> again"]);
    }

    #[test]
    fn test_register_object_replaces() {
        let mut first = MockHostObject::new();
        first.expect_get().returning(|_| Some(Dynamic::from(1_i64)));
        first.expect_method_names().returning(Vec::new);
        let mut second = MockHostObject::new();
        second.expect_get().returning(|_| Some(Dynamic::from(2_i64)));
        second.expect_method_names().returning(Vec::new);

        let (mut console, rx) = console();
        console.register_object("obj", Arc::new(first));
        console.register_object("obj", Arc::new(second));
        console.reset();

        console.execute("obj.value").unwrap();
        assert_eq!(texts(&rx), vec!["=> 2"]);
    }
}
