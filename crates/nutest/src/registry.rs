//! Test case registry
//!
//! This module manages the registration and storage of test cases, grouped
//! into suites. Suites keep their creation order and test cases keep their
//! registration order; the runner executes them in exactly that order.

use crate::error::RegistryError;
use crate::result::TestResult;
use std::fmt;
use std::rc::Rc;

/// Invocable body of a registered test
pub type TestFn = Rc<dyn Fn() -> TestResult>;

/// A registered test case
#[derive(Clone)]
pub struct TestCase {
    name: String,
    suite: String,
    description: Option<String>,
    function: TestFn,
}

impl TestCase {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the owning suite
    pub fn suite(&self) -> &str {
        &self.suite
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// `Suite.test`
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.suite, self.name)
    }

    /// Call the test function
    pub fn invoke(&self) -> TestResult {
        (self.function)()
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("suite", &self.suite)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// A named, ordered group of test cases
#[derive(Debug, Clone)]
pub struct Suite {
    name: String,
    tests: Vec<TestCase>,
    description: Option<String>,
}

impl Suite {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tests: Vec::new(),
            description: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Test cases in registration order
    pub fn tests(&self) -> &[TestCase] {
        &self.tests
    }

    pub fn test_count(&self) -> usize {
        self.tests.len()
    }
}

/// Catalog of suites, in creation order
///
/// A registry is an ordinary value: build it during a single-threaded
/// initialization phase, then hand it to the runner by reference.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    suites: Vec<Suite>,
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self { suites: Vec::new() }
    }

    /// Register a test case
    ///
    /// Finds the suite named `suite_name` (creating and appending it if
    /// absent) and appends the test case to it. Duplicate test names are
    /// accepted; every registration runs.
    pub fn register<F>(
        &mut self,
        test_name: impl Into<String>,
        suite_name: impl Into<String>,
        function: F,
        description: Option<&str>,
    ) -> Result<(), RegistryError>
    where
        F: Fn() -> TestResult + 'static,
    {
        let suite_name = suite_name.into();
        let index = self.find_or_create(&suite_name)?;
        let suite = &mut self.suites[index];

        suite
            .tests
            .try_reserve(1)
            .map_err(|source| RegistryError::Capacity {
                what: "test case",
                source,
            })?;

        suite.tests.push(TestCase {
            name: test_name.into(),
            suite: suite_name,
            description: description.map(str::to_string),
            function: Rc::new(function),
        });

        Ok(())
    }

    /// Attach a description to a suite, creating the suite if needed
    pub fn describe_suite(
        &mut self,
        suite_name: &str,
        description: &str,
    ) -> Result<(), RegistryError> {
        let index = self.find_or_create(suite_name)?;
        self.suites[index].description = Some(description.to_string());
        Ok(())
    }

    /// Linear scan by name; a new suite goes to the end
    fn find_or_create(&mut self, suite_name: &str) -> Result<usize, RegistryError> {
        if let Some(index) = self.suites.iter().position(|s| s.name == suite_name) {
            return Ok(index);
        }

        self.suites
            .try_reserve(1)
            .map_err(|source| RegistryError::Capacity {
                what: "suite",
                source,
            })?;
        self.suites.push(Suite::new(suite_name));

        Ok(self.suites.len() - 1)
    }

    /// Suites in creation order
    pub fn suites(&self) -> &[Suite] {
        &self.suites
    }

    /// Look up a suite by name
    pub fn suite(&self, name: &str) -> Option<&Suite> {
        self.suites.iter().find(|s| s.name == name)
    }

    pub fn suite_count(&self) -> usize {
        self.suites.len()
    }

    /// Number of registered test cases across all suites
    pub fn test_count(&self) -> usize {
        self.suites.iter().map(Suite::test_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.test_count() == 0
    }

    /// Keep the test cases whose `Suite.test` name contains `pattern`
    ///
    /// Order is preserved; suites left without tests are dropped.
    pub fn filter(&self, pattern: &str) -> Self {
        let suites = self
            .suites
            .iter()
            .filter_map(|suite| {
                let tests: Vec<_> = suite
                    .tests
                    .iter()
                    .filter(|t| t.qualified_name().contains(pattern))
                    .cloned()
                    .collect();

                (!tests.is_empty()).then(|| Suite {
                    name: suite.name.clone(),
                    tests,
                    description: suite.description.clone(),
                })
            })
            .collect();

        Registry { suites }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pass() -> TestResult {
        TestResult::Pass
    }

    #[test]
    fn test_register_creates_suite() {
        let mut registry = Registry::new();
        registry.register("a", "S", pass, None).unwrap();

        assert_eq!(registry.suite_count(), 1);
        assert_eq!(registry.test_count(), 1);
        assert_eq!(registry.suites()[0].name(), "S");
    }

    #[test]
    fn test_same_suite_appends() {
        let mut registry = Registry::new();
        registry.register("A", "S", pass, None).unwrap();
        registry.register("B", "S", pass, None).unwrap();

        assert_eq!(registry.suite_count(), 1);
        let suite = registry.suite("S").unwrap();
        assert_eq!(suite.test_count(), 2);
        let names: Vec<_> = suite.tests().iter().map(TestCase::name).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_suites_keep_creation_order() {
        let mut registry = Registry::new();
        registry.register("t1", "Zeta", pass, None).unwrap();
        registry.register("t2", "Alpha", pass, None).unwrap();
        registry.register("t3", "Zeta", pass, None).unwrap();

        let names: Vec<_> = registry.suites().iter().map(Suite::name).collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut registry = Registry::new();
        registry.register("same", "S", pass, None).unwrap();
        registry.register("same", "S", pass, None).unwrap();

        assert_eq!(registry.test_count(), 2);
    }

    #[test]
    fn test_descriptions() {
        let mut registry = Registry::new();
        registry
            .register("a", "S", pass, Some("checks a"))
            .unwrap();
        registry.describe_suite("S", "the S suite").unwrap();

        let suite = registry.suite("S").unwrap();
        assert_eq!(suite.description(), Some("the S suite"));
        assert_eq!(suite.tests()[0].description(), Some("checks a"));
        assert_eq!(suite.tests()[0].qualified_name(), "S.a");
    }

    #[test]
    fn test_filter_preserves_order() {
        let mut registry = Registry::new();
        registry.register("add_ok", "Math", pass, None).unwrap();
        registry.register("concat", "Strings", pass, None).unwrap();
        registry.register("add_bug", "Math", pass, None).unwrap();

        let filtered = registry.filter("add");
        assert_eq!(filtered.suite_count(), 1);
        let names: Vec<_> = filtered.suites()[0].tests().iter().map(TestCase::name).collect();
        assert_eq!(names, vec!["add_ok", "add_bug"]);

        let by_suite = registry.filter("Strings.");
        assert_eq!(by_suite.test_count(), 1);
        assert!(registry.filter("nothing").is_empty());
    }
}
