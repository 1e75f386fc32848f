//! Route registry and request matching.
//!
//! # Responsibilities
//! - Store routes under their unique name
//! - Reject duplicate names and duplicate (method, template) pairs
//! - Resolve a request to its most specific route
//!
//! # Design Decisions
//! - Built once at startup, then shared read-only via `Arc`
//! - O(n) scan over routes (the route table is small and fixed)
//! - Ties between equally specific templates go to the first registered

use std::collections::HashMap;

use axum::http::Method;

use super::template::{PathParams, PathTemplate};
use super::RegistrationError;

/// A registered route.
#[derive(Debug, Clone)]
pub struct Route {
    name: String,
    template: PathTemplate,
    methods: Vec<Method>,
}

impl Route {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn template(&self) -> &PathTemplate {
        &self.template
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn allows(&self, method: &Method) -> bool {
        self.methods.contains(method)
    }
}

/// Outcome of matching a request against the registry.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution {
    /// `index` is the registration order of the matched route.
    Matched { index: usize, params: PathParams },
    MethodNotAllowed,
    NotFound,
}

/// Routes keyed by name, in registration order.
#[derive(Debug, Default)]
pub struct RouteRegistry {
    routes: Vec<Route>,
    by_name: HashMap<String, usize>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route and return its index.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        template: &str,
        methods: &[Method],
    ) -> Result<usize, RegistrationError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(RegistrationError::DuplicateName(name));
        }
        if methods.is_empty() {
            return Err(RegistrationError::NoMethods(name));
        }

        let template = PathTemplate::parse(template)?;
        for existing in &self.routes {
            if !existing.template.same_shape(&template) {
                continue;
            }
            if let Some(method) = methods.iter().find(|m| existing.allows(m)) {
                return Err(RegistrationError::DuplicateRoute {
                    method: method.to_string(),
                    template: template.as_str().to_string(),
                    existing: existing.name.clone(),
                });
            }
        }

        tracing::debug!(route = %name, template = %template.as_str(), "Registering route");

        let index = self.routes.len();
        self.by_name.insert(name.clone(), index);
        self.routes.push(Route {
            name,
            template,
            methods: methods.to_vec(),
        });
        Ok(index)
    }

    /// Look up a route by name.
    pub fn get(&self, name: &str) -> Option<&Route> {
        self.by_name.get(name).and_then(|&i| self.routes.get(i))
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Resolve a request to the most specific route allowing `method`.
    ///
    /// If some template matches the path but none allows the method, the
    /// result is [`Resolution::MethodNotAllowed`].
    pub fn resolve(&self, method: &Method, path: &str) -> Resolution {
        let mut path_matched = false;
        let mut best: Option<(usize, usize, PathParams)> = None;

        for (index, route) in self.routes.iter().enumerate() {
            let Some(params) = route.template.matches(path) else {
                continue;
            };
            path_matched = true;
            if !route.allows(method) {
                continue;
            }
            let specificity = route.template.specificity();
            if best.as_ref().map_or(true, |(_, s, _)| specificity > *s) {
                best = Some((index, specificity, params));
            }
        }

        match best {
            Some((index, _, params)) => Resolution::Matched { index, params },
            None if path_matched => Resolution::MethodNotAllowed,
            None => Resolution::NotFound,
        }
    }
}
