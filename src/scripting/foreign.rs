//! Host objects exposed to console scripts
//!
//! A [`HostObject`] is a native value with a reflective interface: it can list its
//! members, read one by name and invoke a named method. Scripts see it as the
//! custom type `ForeignObject`:
//!
//! ```rhai
//! Console.version            // property read, goes through HostObject::get
//! Console["uptime_secs"]     // same, by index
//! Console.invoke("echo", ["hi"])
//! Console.echo("hi")         // method call, once registered
//! let f = Console.echo; f.call("hi")
//! ```

use crate::error::Result;
use rhai::{Array, Dynamic, EvalAltResult, FnPtr, ImmutableString};
use std::fmt;
use std::sync::Arc;

/// Reflective descriptor of a native object
///
/// `get` may run computed getters, so reading a member can have side effects.
#[cfg_attr(test, mockall::automock)]
pub trait HostObject: Send + Sync {
    /// Name shown when the object is printed
    fn type_name(&self) -> String;

    /// Enumerable member names, in display order
    fn member_names(&self) -> Vec<String>;

    /// Current value of a member, `None` if there is no such member
    fn get(&self, name: &str) -> Option<Dynamic>;

    /// Call a method with positional arguments
    fn invoke(&self, name: &str, args: Vec<Dynamic>) -> Result<Dynamic>;

    /// Members that are methods, callable from scripts as `obj.name(args)`
    fn method_names(&self) -> Vec<String> {
        Vec::new()
    }
}

type ScriptResult = std::result::Result<Dynamic, Box<EvalAltResult>>;

/// Cloneable handle to a [`HostObject`], stored in Rhai values
#[derive(Clone)]
pub struct ForeignObject(Arc<dyn HostObject>);

impl ForeignObject {
    /// Name of the custom type as seen by scripts
    pub const TYPE_NAME: &'static str = "ForeignObject";

    pub fn new(object: Arc<dyn HostObject>) -> Self {
        Self(object)
    }

    pub fn type_name(&self) -> String {
        self.0.type_name()
    }

    pub fn member_names(&self) -> Vec<String> {
        self.0.member_names()
    }

    pub fn get(&self, name: &str) -> Option<Dynamic> {
        self.0.get(name)
    }

    pub fn invoke(&self, name: &str, args: Vec<Dynamic>) -> Result<Dynamic> {
        self.0.invoke(name, args)
    }

    pub fn method_names(&self) -> Vec<String> {
        self.0.method_names()
    }

    fn call(&self, method: &str, args: Vec<Dynamic>) -> ScriptResult {
        self.invoke(method, args).map_err(|e| e.to_string().into())
    }

    /// Read a member for a script; a method comes back bound to this object
    fn read(&self, name: &str) -> ScriptResult {
        let value = self
            .get(name)
            .ok_or_else(|| format!("{} has no member '{}'", self.type_name(), name))?;

        if value.is::<FnPtr>() {
            if let Some(mut method) = value.clone().try_cast::<FnPtr>() {
                method.add_curry(Dynamic::from(self.clone()));
                return Ok(Dynamic::from(method));
            }
        }
        Ok(value)
    }

    /// Register the custom type, its indexer and `invoke` with an engine
    ///
    /// Property access such as `obj.name` falls back to the string indexer.
    pub fn register(engine: &mut rhai::Engine) {
        engine.register_type_with_name::<ForeignObject>(Self::TYPE_NAME);

        engine.register_indexer_get(|obj: &mut ForeignObject, name: ImmutableString| {
            obj.read(&name)
        });

        engine.register_fn(
            "invoke",
            |obj: &mut ForeignObject, method: ImmutableString, args: Array| {
                obj.call(&method, args)
            },
        );
        engine.register_fn("invoke", |obj: &mut ForeignObject, method: ImmutableString| {
            obj.call(&method, Vec::new())
        });

        engine.register_fn("members", |obj: &mut ForeignObject| -> Array {
            obj.member_names().into_iter().map(Dynamic::from).collect()
        });
        engine.register_fn("to_string", |obj: &mut ForeignObject| obj.to_string());
        engine.register_fn("to_debug", |obj: &mut ForeignObject| format!("{:?}", obj));
    }

    /// Register `obj.method(...)` for every method this object lists, with up to three
    /// positional arguments
    ///
    /// Dispatch happens on the receiver, so objects sharing a method name each reach
    /// their own `invoke`.
    pub fn register_methods(&self, engine: &mut rhai::Engine) {
        for method in self.method_names() {
            let name = method.clone();
            engine.register_fn(method.as_str(), move |obj: &mut ForeignObject| {
                obj.call(&name, Vec::new())
            });
            let name = method.clone();
            engine.register_fn(method.as_str(), move |obj: &mut ForeignObject, a: Dynamic| {
                obj.call(&name, vec![a])
            });
            let name = method.clone();
            engine.register_fn(
                method.as_str(),
                move |obj: &mut ForeignObject, a: Dynamic, b: Dynamic| obj.call(&name, vec![a, b]),
            );
            let name = method.clone();
            engine.register_fn(
                method.as_str(),
                move |obj: &mut ForeignObject, a: Dynamic, b: Dynamic, c: Dynamic| {
                    obj.call(&name, vec![a, b, c])
                },
            );
            tracing::debug!("Registered host method {}.{}", self.type_name(), method);
        }
    }
}

impl fmt::Display for ForeignObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.type_name())
    }
}

impl fmt::Debug for ForeignObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForeignObject")
            .field("type_name", &self.type_name())
            .field("members", &self.member_names())
            .finish()
    }
}
