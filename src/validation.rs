//! Startup validation of dependency manifests.
//!
//! [`Container::validate`] walks every eligible component's manifest and
//! checks that each argument would resolve to exactly one component, and that
//! the resulting graph has no cycles. Nothing is constructed.

use std::collections::HashMap;
use std::fmt;

use crate::error::{describe_request, DiError};
use crate::Container;

/// A manifest problem found by [`Container::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No eligible component matches an argument
    MissingDependency {
        component: String,
        parameter: String,
        request: String,
    },
    /// Several eligible components match an argument
    AmbiguousDependency {
        component: String,
        parameter: String,
        candidates: Vec<String>,
    },
    /// Components that depend on each other in a cycle
    CircularDependency { cycle: Vec<String> },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingDependency {
                component,
                parameter,
                request,
            } => write!(
                f,
                "{}: argument '{}' has no component for {}",
                component, parameter, request
            ),
            ValidationError::AmbiguousDependency {
                component,
                parameter,
                candidates,
            } => write!(
                f,
                "{}: argument '{}' is ambiguous between {}",
                component,
                parameter,
                candidates.join(", ")
            ),
            ValidationError::CircularDependency { cycle } => {
                write!(f, "circular dependency: {}", cycle.join(" -> "))
            }
        }
    }
}

/// Outcome of [`Container::validate`].
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    /// Problems found, in registration order of the offending component
    pub errors: Vec<ValidationError>,
    /// Number of eligible components checked
    pub checked: usize,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

impl Container {
    /// Checks every eligible component's manifest without constructing anything.
    ///
    /// # Examples
    ///
    /// ```
    /// use ferrous_inject::{ComponentCollection, ComponentDef, ValidationError};
    ///
    /// struct Report;
    ///
    /// let mut components = ComponentCollection::new();
    /// components
    ///     .register(ComponentDef::function(|_| Ok(Report)).named("report").arg_untyped("printer"))
    ///     .unwrap();
    ///
    /// let result = components.build().validate();
    /// assert!(!result.is_valid());
    /// assert!(matches!(
    ///     &result.errors[0],
    ///     ValidationError::MissingDependency { parameter, .. } if parameter == "printer"
    /// ));
    /// ```
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();
        let mut edges: HashMap<usize, Vec<usize>> = HashMap::new();
        let mut labels: HashMap<usize, &str> = HashMap::new();

        for descriptor in self.registry().iter() {
            if !descriptor.is_eligible(self.active_profiles()) {
                continue;
            }
            result.checked += 1;
            labels.insert(descriptor.id, &descriptor.label);

            for dependency in &descriptor.dependencies {
                let requirement = descriptor.requirement(dependency);
                match self.select(requirement.type_key.as_ref(), requirement.name) {
                    Ok(target) => edges.entry(descriptor.id).or_default().push(target.id),
                    Err(DiError::Ambiguous { candidates, .. }) => {
                        result.errors.push(ValidationError::AmbiguousDependency {
                            component: descriptor.label.clone(),
                            parameter: dependency.parameter().to_string(),
                            candidates,
                        })
                    }
                    Err(_) => result.errors.push(ValidationError::MissingDependency {
                        component: descriptor.label.clone(),
                        parameter: dependency.parameter().to_string(),
                        request: describe_request(
                            requirement.type_key.map(|k| k.type_name()),
                            requirement.name,
                        ),
                    }),
                }
            }
        }

        let mut marks: HashMap<usize, Mark> = HashMap::new();
        let mut roots: Vec<usize> = labels.keys().copied().collect();
        roots.sort_unstable();
        for root in roots {
            let mut path = Vec::new();
            find_cycles(root, &edges, &labels, &mut marks, &mut path, &mut result.errors);
        }

        if !result.is_valid() {
            tracing::warn!(problems = result.errors.len(), "component validation failed");
        }
        result
    }
}

fn find_cycles(
    node: usize,
    edges: &HashMap<usize, Vec<usize>>,
    labels: &HashMap<usize, &str>,
    marks: &mut HashMap<usize, Mark>,
    path: &mut Vec<usize>,
    errors: &mut Vec<ValidationError>,
) {
    match marks.get(&node) {
        Some(Mark::Done) => return,
        Some(Mark::Visiting) => {
            if let Some(start) = path.iter().position(|n| *n == node) {
                let mut cycle: Vec<String> = path[start..]
                    .iter()
                    .map(|n| labels.get(n).copied().unwrap_or("?").to_string())
                    .collect();
                cycle.push(labels.get(&node).copied().unwrap_or("?").to_string());
                errors.push(ValidationError::CircularDependency { cycle });
            }
            return;
        }
        None => {}
    }

    marks.insert(node, Mark::Visiting);
    path.push(node);
    if let Some(targets) = edges.get(&node) {
        for target in targets {
            find_cycles(*target, edges, labels, marks, path, errors);
        }
    }
    path.pop();
    marks.insert(node, Mark::Done);
}
