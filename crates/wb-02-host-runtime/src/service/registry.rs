//! Name → host function lookup.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::domain::{CallContext, HandlerError};
use crate::ports::HostFunction;

/// Host functions by name.
///
/// Built before the runtime starts; registering a name twice replaces the
/// earlier function.
#[derive(Default, Clone)]
pub struct FunctionRegistry {
    functions: HashMap<String, Arc<dyn HostFunction>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, function: Arc<dyn HostFunction>) {
        let name = name.into();
        if self.functions.insert(name.clone(), function).is_some() {
            tracing::debug!(func = %name, "Replaced host function");
        }
    }

    /// Register a synchronous closure.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, function: F)
    where
        F: Fn(&CallContext, Vec<Value>) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.register(name, Arc::new(FnFunction::new(function)));
    }

    /// Register a closure returning a future.
    pub fn register_async_fn<F, Fut>(&mut self, name: impl Into<String>, function: F)
    where
        F: Fn(CallContext, Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, HandlerError>> + Send + 'static,
    {
        self.register(name, Arc::new(AsyncFnFunction::new(function)));
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn HostFunction>> {
        self.functions.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.names())
            .finish()
    }
}

/// Host function backed by a synchronous closure.
pub struct FnFunction<F> {
    function: F,
}

impl<F> FnFunction<F> {
    pub fn new(function: F) -> Self {
        Self { function }
    }
}

#[async_trait]
impl<F> HostFunction for FnFunction<F>
where
    F: Fn(&CallContext, Vec<Value>) -> Result<Value, HandlerError> + Send + Sync,
{
    async fn call(&self, ctx: &CallContext, args: Vec<Value>) -> Result<Value, HandlerError> {
        (self.function)(ctx, args)
    }
}

/// Host function backed by an async closure.
pub struct AsyncFnFunction<F> {
    function: F,
}

impl<F> AsyncFnFunction<F> {
    pub fn new(function: F) -> Self {
        Self { function }
    }
}

#[async_trait]
impl<F, Fut> HostFunction for AsyncFnFunction<F>
where
    F: Fn(CallContext, Vec<Value>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value, HandlerError>> + Send + 'static,
{
    async fn call(&self, ctx: &CallContext, args: Vec<Value>) -> Result<Value, HandlerError> {
        (self.function)(ctx.clone(), args).await
    }
}
