//! The built-in `Console` host object

use super::foreign::HostObject;
use crate::error::{ConsoleError, Result};
use chrono::{DateTime, Local};
use rhai::Dynamic;
use std::sync::atomic::{AtomicU64, Ordering};

/// Information about the running console, registered as `Console`
///
/// Every member read is counted; the count itself is readable as `reads`.
#[derive(Debug)]
pub struct ConsoleInfo {
    started_at: DateTime<Local>,
    reads: AtomicU64,
}

impl ConsoleInfo {
    pub const NAME: &'static str = "Console";

    const MEMBERS: [&'static str; 5] = ["version", "started_at", "uptime_secs", "reads", "echo"];

    const METHODS: [&'static str; 1] = ["echo"];

    pub fn new() -> Self {
        Self {
            started_at: Local::now(),
            reads: AtomicU64::new(0),
        }
    }

    /// Number of member reads so far
    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }
}

impl Default for ConsoleInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl HostObject for ConsoleInfo {
    fn type_name(&self) -> String {
        Self::NAME.to_string()
    }

    fn member_names(&self) -> Vec<String> {
        Self::MEMBERS.iter().map(|m| m.to_string()).collect()
    }

    fn method_names(&self) -> Vec<String> {
        Self::METHODS.iter().map(|m| m.to_string()).collect()
    }

    fn get(&self, name: &str) -> Option<Dynamic> {
        let value = match name {
            "version" => Dynamic::from(env!("CARGO_PKG_VERSION").to_string()),
            "started_at" => Dynamic::from(self.started_at.to_rfc3339()),
            "uptime_secs" => {
                Dynamic::from((Local::now() - self.started_at).num_milliseconds() as f64 / 1000.0)
            }
            "reads" => Dynamic::from(self.reads() as i64 + 1),
            "echo" => rhai::FnPtr::new("echo").map(Dynamic::from).ok()?,
            _ => return None,
        };
        self.reads.fetch_add(1, Ordering::Relaxed);
        Some(value)
    }

    fn invoke(&self, name: &str, args: Vec<Dynamic>) -> Result<Dynamic> {
        match name {
            "echo" => {
                let text = args
                    .iter()
                    .map(|a| a.to_string())
                    .collect::<Vec<_>>()
                    .join(" ");
                Ok(Dynamic::from(text))
            }
            _ => Err(ConsoleError::Script(format!(
                "{} has no method '{}'",
                Self::NAME,
                name
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_members_are_readable() {
        let info = ConsoleInfo::new();
        for name in info.member_names() {
            assert!(info.get(&name).is_some(), "missing member {}", name);
        }
        assert!(info.get("nope").is_none());
    }

    #[test]
    fn test_methods_are_members() {
        let info = ConsoleInfo::new();
        let members = info.member_names();
        for method in info.method_names() {
            assert!(members.contains(&method));
            assert!(info.get(&method).unwrap().is::<rhai::FnPtr>());
        }
    }

    #[test]
    fn test_reads_are_counted() {
        let info = ConsoleInfo::new();
        assert_eq!(info.reads(), 0);
        info.get("version");
        info.get("missing");
        assert_eq!(info.reads(), 1);

        // Reading `reads` counts itself
        let reads = info.get("reads").unwrap().as_int().unwrap();
        assert_eq!(reads, 2);
        assert_eq!(info.reads(), 2);
    }

    #[test]
    fn test_echo() {
        let info = ConsoleInfo::new();
        let out = info
            .invoke("echo", vec![Dynamic::from("a".to_string()), Dynamic::from(1_i64)])
            .unwrap();
        assert_eq!(out.into_string().unwrap(), "a 1");
        assert!(info.invoke("shout", Vec::new()).is_err());
    }
}
