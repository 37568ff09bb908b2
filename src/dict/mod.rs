//! Thread-safe typed dictionary populated by config loads.

mod error;
mod value;

use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

pub use error::DictError;
pub use value::{Kind, Value};

/// The three key/value maps of a dictionary, one per [`Kind`].
///
/// Keys are unique within a namespace only; the same key may live in several
/// namespaces at once. Inserting an existing key replaces its value (last wins).
#[derive(Debug, Clone, Default)]
pub struct Namespaces {
    ints: HashMap<String, i64>,
    floats: HashMap<String, f64>,
    strings: HashMap<String, String>,
}

impl Namespaces {
    /// Inserts `value` into the namespace matching its kind.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<Value>) -> bool {
        let key = key.into();
        match value.into() {
            Value::Int(i) => {
                self.ints.insert(key, i);
            }
            Value::Float(f) => {
                self.floats.insert(key, f);
            }
            Value::Str(s) => {
                self.strings.insert(key, s);
            }
        }
        true
    }

    pub fn check(&self, key: &str, kind: Kind) -> bool {
        match kind {
            Kind::Int => self.ints.contains_key(key),
            Kind::Float => self.floats.contains_key(key),
            Kind::Str => self.strings.contains_key(key),
        }
    }

    /// Looks `key` up in the `kind` namespace.
    ///
    /// A miss reports [`DictError::WrongKind`] if the key exists in another
    /// namespace and [`DictError::NotFound`] otherwise.
    pub fn get(&self, key: &str, kind: Kind) -> Result<Value, DictError> {
        let found = match kind {
            Kind::Int => self.ints.get(key).map(|i| Value::Int(*i)),
            Kind::Float => self.floats.get(key).map(|f| Value::Float(*f)),
            Kind::Str => self.strings.get(key).map(|s| Value::Str(s.clone())),
        };
        found.ok_or_else(|| self.miss(key, kind))
    }

    pub fn len(&self) -> usize {
        self.ints.len() + self.floats.len() + self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys of one namespace, sorted.
    pub fn keys(&self, kind: Kind) -> Vec<String> {
        let mut keys: Vec<String> = match kind {
            Kind::Int => self.ints.keys().cloned().collect(),
            Kind::Float => self.floats.keys().cloned().collect(),
            Kind::Str => self.strings.keys().cloned().collect(),
        };
        keys.sort();
        keys
    }

    fn miss(&self, key: &str, requested: Kind) -> DictError {
        let present: Vec<Kind> = Kind::ALL
            .into_iter()
            .filter(|k| *k != requested && self.check(key, *k))
            .collect();
        if present.is_empty() {
            DictError::NotFound {
                key: key.to_string(),
                kind: requested,
            }
        } else {
            DictError::WrongKind {
                key: key.to_string(),
                requested,
                present,
            }
        }
    }

    fn write_section<V: std::fmt::Display>(
        out: &mut String,
        title: &str,
        map: &HashMap<String, V>,
    ) {
        let capacity = map.capacity();
        let load = if capacity == 0 {
            0.0
        } else {
            map.len() as f64 / capacity as f64
        };
        let _ = writeln!(out, "+->{title} Database");
        let _ = writeln!(out, "+--->Size: {}", map.len());
        let _ = writeln!(out, "+--->Capacity: {capacity}");
        let _ = writeln!(out, "+--->Load Factor: {load:.6}");
        let _ = writeln!(out, "+--->Entries:");
        let mut entries: Vec<_> = map.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        for (key, value) in entries {
            let _ = writeln!(out, "          {key}: {value}");
        }
        out.push('\n');
    }
}

#[derive(Debug, Clone, Default)]
struct Inner {
    namespaces: Namespaces,
    source: Option<PathBuf>,
}

/// Typed key/value store shared between threads.
///
/// Every method takes the internal lock for its own duration only, so a
/// sequence such as [`check`](Self::check) followed by [`add`](Self::add) is
/// not atomic. Use [`batch`](Self::batch) when several steps must observe one
/// consistent state.
///
/// ## Example
///
/// ```
/// use linedict::{Dict, Kind};
///
/// let dict = Dict::new();
/// dict.add("CFL_NUMBER", 0.5);
/// dict.add("SCHEME", "HLLE");
///
/// assert!(dict.check("CFL_NUMBER", Kind::Float));
/// assert_eq!(dict.get_string("SCHEME")?, "HLLE");
/// # Ok::<(), linedict::DictError>(())
/// ```
#[derive(Debug, Default)]
pub struct Dict {
    inner: Mutex<Inner>,
}

impl Clone for Dict {
    fn clone(&self) -> Self {
        Self {
            inner: Mutex::new(self.inner.lock().clone()),
        }
    }
}

impl Dict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value into the namespace of its kind. Always returns `true`.
    pub fn add(&self, key: impl Into<String>, value: impl Into<Value>) -> bool {
        self.inner.lock().namespaces.add(key, value)
    }

    pub fn get(&self, key: &str, kind: Kind) -> Result<Value, DictError> {
        self.inner.lock().namespaces.get(key, kind)
    }

    pub fn get_int(&self, key: &str) -> Result<i64, DictError> {
        let inner = self.inner.lock();
        let ns = &inner.namespaces;
        ns.ints.get(key).copied().ok_or_else(|| ns.miss(key, Kind::Int))
    }

    pub fn get_float(&self, key: &str) -> Result<f64, DictError> {
        let inner = self.inner.lock();
        let ns = &inner.namespaces;
        ns.floats
            .get(key)
            .copied()
            .ok_or_else(|| ns.miss(key, Kind::Float))
    }

    pub fn get_string(&self, key: &str) -> Result<String, DictError> {
        let inner = self.inner.lock();
        let ns = &inner.namespaces;
        ns.strings
            .get(key)
            .cloned()
            .ok_or_else(|| ns.miss(key, Kind::Str))
    }

    /// Reads a boolean from the string namespace.
    ///
    /// Only `true` and `false` (in any letter case) are accepted.
    pub fn get_bool(&self, key: &str) -> Result<bool, DictError> {
        let value = self.get_string(key)?;
        if value.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if value.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(DictError::InvalidBool {
                key: key.to_string(),
                value,
            })
        }
    }

    pub fn check(&self, key: &str, kind: Kind) -> bool {
        self.inner.lock().namespaces.check(key, kind)
    }

    pub fn check_int(&self, key: &str) -> bool {
        self.check(key, Kind::Int)
    }

    pub fn check_float(&self, key: &str) -> bool {
        self.check(key, Kind::Float)
    }

    pub fn check_string(&self, key: &str) -> bool {
        self.check(key, Kind::Str)
    }

    /// Total number of entries across all namespaces.
    pub fn len(&self) -> usize {
        self.inner.lock().namespaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn keys(&self, kind: Kind) -> Vec<String> {
        self.inner.lock().namespaces.keys(kind)
    }

    /// Runs `f` with the lock held for its whole duration.
    ///
    /// ```
    /// use linedict::{Dict, Kind};
    ///
    /// let dict = Dict::new();
    /// dict.batch(|ns| {
    ///     if !ns.check("SCHEME", Kind::Str) {
    ///         ns.add("SCHEME", "HLLE");
    ///     }
    /// });
    /// assert!(dict.check_string("SCHEME"));
    /// ```
    pub fn batch<R>(&self, f: impl FnOnce(&mut Namespaces) -> R) -> R {
        f(&mut self.inner.lock().namespaces)
    }

    /// The file this dictionary was last successfully loaded from.
    pub fn source(&self) -> Option<PathBuf> {
        self.inner.lock().source.clone()
    }

    pub(crate) fn set_source(&self, path: &Path) {
        self.inner.lock().source = Some(path.to_path_buf());
    }

    /// Renders every namespace with its size, capacity, load factor and entries.
    ///
    /// Intended for debugging; the layout is not stable.
    pub fn dump(&self) -> String {
        let inner = self.inner.lock();
        let ns = &inner.namespaces;
        let mut out = String::from("Dictionary Dump\n");
        if let Some(source) = &inner.source {
            let _ = writeln!(out, "Source: {}", source.display());
        }
        out.push('\n');
        Namespaces::write_section(&mut out, "Integer", &ns.ints);
        Namespaces::write_section(&mut out, "Float", &ns.floats);
        Namespaces::write_section(&mut out, "String", &ns.strings);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_add_and_get_each_kind() {
        let dict = Dict::new();
        assert!(dict.add("n", 42));
        assert!(dict.add("x", 3.5));
        assert!(dict.add("s", "hello"));

        assert_eq!(dict.get_int("n").unwrap(), 42);
        assert_eq!(dict.get_float("x").unwrap(), 3.5);
        assert_eq!(dict.get_string("s").unwrap(), "hello");
        assert_eq!(dict.get("n", Kind::Int).unwrap(), Value::Int(42));
        assert_eq!(dict.len(), 3);
    }

    #[test]
    fn test_same_key_in_several_namespaces() {
        let dict = Dict::new();
        dict.add("k", 1);
        dict.add("k", "one");

        assert_eq!(dict.get_int("k").unwrap(), 1);
        assert_eq!(dict.get_string("k").unwrap(), "one");
        assert!(!dict.check("k", Kind::Float));
    }

    #[test]
    fn test_last_insert_wins() {
        let dict = Dict::new();
        dict.add("k", 1);
        dict.add("k", 2);
        assert_eq!(dict.get_int("k").unwrap(), 2);
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn test_missing_key_is_not_found() {
        let dict = Dict::new();
        let err = dict.get_float("absent").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(
            err,
            DictError::NotFound {
                key: "absent".into(),
                kind: Kind::Float
            }
        );
    }

    #[test]
    fn test_wrong_namespace_is_distinguishable() {
        let dict = Dict::new();
        dict.add("CFL_NUMBER", 0.5);

        let err = dict.get_int("CFL_NUMBER").unwrap_err();
        assert!(!err.is_not_found());
        assert!(matches!(
            err,
            DictError::WrongKind { requested: Kind::Int, ref present, .. } if present == &[Kind::Float]
        ));
    }

    #[test]
    fn test_get_bool() {
        let dict = Dict::new();
        dict.add("a", "True");
        dict.add("b", "FALSE");
        dict.add("c", "yes");

        assert!(dict.get_bool("a").unwrap());
        assert!(!dict.get_bool("b").unwrap());
        assert!(matches!(
            dict.get_bool("c"),
            Err(DictError::InvalidBool { .. })
        ));
        assert!(dict.get_bool("d").unwrap_err().is_not_found());
    }

    #[test]
    fn test_keys_sorted() {
        let dict = Dict::new();
        dict.add("b", 1);
        dict.add("a", 2);
        dict.add("c", "x");
        assert_eq!(dict.keys(Kind::Int), vec!["a", "b"]);
        assert_eq!(dict.keys(Kind::Str), vec!["c"]);
    }

    #[test]
    fn test_batch_check_then_add() {
        let dict = Dict::new();
        dict.add("SCHEME", "ROE");
        let inserted = dict.batch(|ns| {
            if ns.check("SCHEME", Kind::Str) {
                false
            } else {
                ns.add("SCHEME", "HLLE")
            }
        });
        assert!(!inserted);
        assert_eq!(dict.get_string("SCHEME").unwrap(), "ROE");
    }

    #[test]
    fn test_clone_is_independent() {
        let dict = Dict::new();
        dict.add("a", 1);
        let copy = dict.clone();
        copy.add("b", 2);
        assert!(!dict.check_int("b"));
        assert!(copy.check_int("a"));
    }

    #[test]
    fn test_dump_lists_entries() {
        let dict = Dict::new();
        dict.add("n", 7);
        dict.add("x", 1.25);
        dict.add("s", "text");
        let dump = dict.dump();

        assert!(dump.starts_with("Dictionary Dump"));
        assert!(dump.contains("+->Integer Database"));
        assert!(dump.contains("          n: 7"));
        assert!(dump.contains("          x: 1.25"));
        assert!(dump.contains("          s: text"));
    }

    #[test]
    fn test_concurrent_adds() {
        let dict = Arc::new(Dict::new());
        std::thread::scope(|scope| {
            for t in 0..4 {
                let dict = Arc::clone(&dict);
                scope.spawn(move || {
                    for i in 0..100 {
                        dict.add(format!("k{t}_{i}"), i64::from(i));
                        assert!(dict.check_int(&format!("k{t}_{i}")));
                    }
                });
            }
        });
        assert_eq!(dict.len(), 400);
        assert_eq!(dict.get_int("k3_99").unwrap(), 99);
    }
}
