use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A typed value processor, keyed by the type keyword that appears in a
/// table's type row. The actual string-to-value conversion lives with the
/// generator; here a processor is the capability record the compiler needs:
/// its own keyword, and for collections the element keyword.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueProcessor {
    Scalar {
        keyword: String,
    },
    Collection {
        keyword: String,
        element_keyword: String,
    },
}

impl ValueProcessor {
    pub fn scalar(keyword: impl Into<String>) -> Self {
        ValueProcessor::Scalar {
            keyword: keyword.into(),
        }
    }

    pub fn collection(keyword: impl Into<String>, element_keyword: impl Into<String>) -> Self {
        ValueProcessor::Collection {
            keyword: keyword.into(),
            element_keyword: element_keyword.into(),
        }
    }

    /// The keyword this processor is registered under.
    pub fn keyword(&self) -> &str {
        match self {
            ValueProcessor::Scalar { keyword } => keyword,
            ValueProcessor::Collection { keyword, .. } => keyword,
        }
    }

    /// The keyword that decides whether cells of this column feed the
    /// literal-string table: the element keyword for a collection, the own
    /// keyword for a scalar.
    pub fn effective_string_keyword(&self) -> &str {
        match self {
            ValueProcessor::Scalar { keyword } => keyword,
            ValueProcessor::Collection {
                element_keyword, ..
            } => element_keyword,
        }
    }

    pub fn is_string_valued(&self) -> bool {
        self.effective_string_keyword() == "string"
    }
}

/// Registry of canonical processor instances, keyed by type keyword.
///
/// Built explicitly and passed by reference to the compiler; populated once
/// before any model construction and only read afterwards, so sharing one
/// instance across threads is fine.
#[derive(Debug, Default)]
pub struct ProcessorRegistry {
    by_keyword: HashMap<String, Arc<ValueProcessor>>,
}

impl ProcessorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the stock keyword set: scalar `id`,
    /// `int`, `long`, `float`, `double`, `bool`, `string`, and a `List<T>`
    /// collection processor for each scalar type.
    pub fn with_builtins() -> Self {
        const SCALARS: [&str; 7] = ["id", "int", "long", "float", "double", "bool", "string"];

        let mut registry = Self::new();
        for keyword in SCALARS {
            registry.register(ValueProcessor::scalar(keyword));
        }
        for keyword in SCALARS.iter().filter(|k| **k != "id") {
            registry.register(ValueProcessor::collection(
                format!("List<{}>", keyword),
                *keyword,
            ));
        }
        registry
    }

    /// Insert a processor under its own keyword, replacing any previous
    /// registration for that keyword.
    pub fn register(&mut self, processor: ValueProcessor) {
        let keyword = processor.keyword().to_string();
        if self
            .by_keyword
            .insert(keyword.clone(), Arc::new(processor))
            .is_some()
        {
            debug!(keyword, "replacing previously registered processor");
        }
    }

    pub fn lookup(&self, keyword: &str) -> Option<&Arc<ValueProcessor>> {
        self.by_keyword.get(keyword)
    }

    pub fn len(&self) -> usize {
        self.by_keyword.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_keyword.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_cover_scalars_and_lists() {
        let registry = ProcessorRegistry::with_builtins();

        let id = registry.lookup("id").expect("id processor");
        assert_eq!(id.keyword(), "id");
        assert_eq!(id.effective_string_keyword(), "id");

        for keyword in ["int", "long", "float", "double", "bool", "string"] {
            let scalar = registry.lookup(keyword).expect("scalar processor");
            assert_eq!(scalar.keyword(), keyword);

            let list_keyword = format!("List<{}>", keyword);
            let list = registry.lookup(&list_keyword).expect("list processor");
            assert_eq!(list.keyword(), list_keyword);
            assert_eq!(list.effective_string_keyword(), keyword);
        }

        // `List<id>` makes no sense and must not exist.
        assert!(registry.lookup("List<id>").is_none());
    }

    #[test]
    fn effective_string_keyword_drives_string_check() {
        assert!(ValueProcessor::scalar("string").is_string_valued());
        assert!(!ValueProcessor::scalar("int").is_string_valued());
        assert!(ValueProcessor::collection("List<string>", "string").is_string_valued());
        // A collection whose *own* keyword mentions string but whose element
        // type is not string must not qualify.
        assert!(!ValueProcessor::collection("List<int>", "int").is_string_valued());
    }

    #[test]
    fn register_replaces_same_keyword() {
        let mut registry = ProcessorRegistry::new();
        registry.register(ValueProcessor::scalar("string"));
        registry.register(ValueProcessor::collection("string", "string"));
        assert_eq!(registry.len(), 1);
        assert!(matches!(
            registry.lookup("string").unwrap().as_ref(),
            ValueProcessor::Collection { .. }
        ));
    }

    #[test]
    fn lookup_unknown_is_none() {
        let registry = ProcessorRegistry::with_builtins();
        assert!(registry.lookup("decimal").is_none());
    }
}
