//! Host objects for exercising foreign-object completion

use rhai::Dynamic;
use rhai_console::{ConsoleError, HostObject, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A host object whose `position` member is a computed getter
///
/// Every read is counted so tests can observe getter side effects.
#[derive(Default)]
pub struct CountingPlayer {
    reads: AtomicUsize,
}

impl CountingPlayer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl HostObject for CountingPlayer {
    fn type_name(&self) -> String {
        "Player".to_string()
    }

    fn member_names(&self) -> Vec<String> {
        ["name", "health", "healthMax", "position", "heal"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn get(&self, name: &str) -> Option<Dynamic> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        match name {
            "name" => Some(Dynamic::from("ada".to_string())),
            "health" => Some(Dynamic::from(7_i64)),
            "healthMax" => Some(Dynamic::from(10_i64)),
            "heal" => rhai::FnPtr::new("heal").ok().map(Dynamic::from),
            "position" => {
                let mut pos = rhai::Map::new();
                pos.insert("x".into(), Dynamic::from(1.5_f64));
                pos.insert("y".into(), Dynamic::from(-2.0_f64));
                Some(Dynamic::from_map(pos))
            }
            _ => None,
        }
    }

    fn method_names(&self) -> Vec<String> {
        vec!["heal".to_string()]
    }

    fn invoke(&self, name: &str, args: Vec<Dynamic>) -> Result<Dynamic> {
        match name {
            "heal" => {
                let amount = args.first().and_then(|a| a.as_int().ok()).unwrap_or(1);
                Ok(Dynamic::from(7 + amount))
            }
            _ => Err(ConsoleError::Script(format!("Player has no method '{}'", name))),
        }
    }
}
