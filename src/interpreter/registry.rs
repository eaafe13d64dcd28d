//! Function registry
//!
//! Maps a function name to its formal parameter list and body. The body type
//! is whatever the evaluator walks; the registry only stores and returns it.

use super::errors::RuntimeError;
use rustc_hash::FxHashMap;

/// A registered function
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef<B> {
    pub name: String,
    pub formals: Vec<String>,
    pub body: B,
}

#[derive(Debug, Clone)]
pub struct FunctionRegistry<B> {
    functions: FxHashMap<String, FunctionDef<B>>,
}

impl<B> FunctionRegistry<B> {
    pub fn new() -> Self {
        FunctionRegistry {
            functions: FxHashMap::default(),
        }
    }

    /// Register a function; a later registration under the same name overwrites
    pub fn register(&mut self, name: impl Into<String>, formals: Vec<String>, body: B) {
        let name = name.into();
        self.functions.insert(
            name.clone(),
            FunctionDef {
                name,
                formals,
                body,
            },
        );
    }

    pub fn get(&self, name: &str) -> Result<&FunctionDef<B>, RuntimeError> {
        self.functions
            .get(name)
            .ok_or_else(|| RuntimeError::UndefinedFunction {
                name: name.to_string(),
            })
    }

    pub fn formals(&self, name: &str) -> Result<&[String], RuntimeError> {
        self.get(name).map(|def| def.formals.as_slice())
    }

    pub fn body(&self, name: &str) -> Result<&B, RuntimeError> {
        self.get(name).map(|def| &def.body)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl<B> Default for FunctionRegistry<B> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = FunctionRegistry::new();
        registry.register("inc", vec!["p".to_string()], "body-a");

        assert_eq!(registry.formals("inc").unwrap(), &["p".to_string()]);
        assert_eq!(*registry.body("inc").unwrap(), "body-a");

        registry.register("inc", vec![], "body-b");
        assert_eq!(registry.len(), 1);
        assert!(registry.formals("inc").unwrap().is_empty());
        assert_eq!(*registry.body("inc").unwrap(), "body-b");
    }

    #[test]
    fn test_missing_function() {
        let registry: FunctionRegistry<()> = FunctionRegistry::new();
        assert_eq!(
            registry.formals("nope"),
            Err(RuntimeError::UndefinedFunction {
                name: "nope".to_string()
            })
        );
        assert!(registry.body("nope").is_err());
    }
}
