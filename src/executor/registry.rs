use super::Executor;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Trait for executor registry that manages available executors
pub trait ExecutorRegistry: Send + Sync {
    /// Register an executor with the given name
    #[allow(dead_code)]
    fn register(&mut self, name: String, executor: Box<dyn Executor>);

    /// Get an executor by name
    fn get(&self, name: &str) -> Result<Arc<dyn Executor>>;

    /// List all registered executor names, sorted
    fn list(&self) -> Vec<String>;
}

/// Default implementation of executor registry using a HashMap
pub struct DefaultExecutorRegistry {
    executors: RwLock<HashMap<String, Arc<dyn Executor>>>,
}

impl DefaultExecutorRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            executors: RwLock::new(HashMap::new()),
        }
    }

    /// Create a new registry with default executors (OpenTofu, Terraform)
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(
            "tofu".to_string(),
            Box::new(crate::executor::OpenTofuExecutor::new()),
        );
        registry.register(
            "terraform".to_string(),
            Box::new(crate::executor::TerraformExecutor::new()),
        );
        registry
    }
}

impl ExecutorRegistry for DefaultExecutorRegistry {
    fn register(&mut self, name: String, executor: Box<dyn Executor>) {
        let mut executors = self.executors.write().unwrap();
        executors.insert(name, Arc::from(executor));
    }

    fn get(&self, name: &str) -> Result<Arc<dyn Executor>> {
        let found = self.executors.read().unwrap().get(name).cloned();

        found.with_context(|| {
            format!("Unknown executor: {} (available: {})", name, self.list().join(", "))
        })
    }

    fn list(&self) -> Vec<String> {
        let executors = self.executors.read().unwrap();
        let mut names: Vec<String> = executors.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for DefaultExecutorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockExecutor {
        name: String,
    }

    impl Executor for MockExecutor {
        fn get_name(&self) -> &str {
            &self.name
        }

        fn binary(&self) -> &str {
            "mock"
        }
    }

    #[test]
    fn test_register_and_get_executor() {
        let mut registry = DefaultExecutorRegistry::new();
        registry.register(
            "test".to_string(),
            Box::new(MockExecutor {
                name: "test".to_string(),
            }),
        );

        let executor = registry.get("test").unwrap();
        assert_eq!(executor.get_name(), "test");
    }

    #[test]
    fn test_get_unknown_executor() {
        let registry = DefaultExecutorRegistry::with_defaults();
        let err = match registry.get("pulumi") {
            Ok(executor) => panic!("unexpected executor: {}", executor.get_name()),
            Err(err) => err,
        };

        assert!(err.to_string().contains("Unknown executor: pulumi"));
        assert!(err.to_string().contains("terraform, tofu"));
    }

    #[test]
    fn test_defaults() {
        let registry = DefaultExecutorRegistry::default();
        assert_eq!(registry.list(), vec!["terraform", "tofu"]);
        assert_eq!(registry.get("terraform").unwrap().binary(), "terraform");
        assert_eq!(registry.get("tofu").unwrap().binary(), "tofu");
    }
}
