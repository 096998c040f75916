//! Argument unification and call recording for plain functions.
//!
//! A [`Signature`] states a callable's declared parameter list and defaults;
//! [`unify_args`] folds one call's positional and keyword arguments into a
//! single name-keyed mapping, and [`LoggedFn`] records that mapping for every
//! invocation while delegating to the wrapped function.

use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Key under which positional arguments are stored for variadic signatures.
pub const VARIADIC_KEY: &str = "args";

/// Unified arguments of one recorded call: parameter name → value.
pub type ArgMap = BTreeMap<String, Value>;

#[derive(Debug)]
struct Param {
    name: String,
    default: Option<Value>,
}

/// A callable's declared parameter list, in declaration order.
///
/// Defaults should only trail required parameters, mirroring how call sites
/// may omit only a trailing run of arguments.
#[derive(Debug, Default)]
pub struct Signature {
    params: Vec<Param>,
    variadic: bool,
}

impl Signature {
    /// A signature with fixed, named parameters; add them with
    /// [`Signature::param`] and [`Signature::param_with_default`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A callable with no introspectable fixed parameter list. All
    /// positional arguments unify verbatim under [`VARIADIC_KEY`].
    #[must_use]
    pub fn variadic() -> Self {
        Self { params: Vec::new(), variadic: true }
    }

    /// Appends a required parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.params.push(Param { name: name.into(), default: None });
        self
    }

    /// Appends a parameter with a declared default value.
    #[must_use]
    pub fn param_with_default(mut self, name: impl Into<String>, default: Value) -> Self {
        self.params.push(Param { name: name.into(), default: Some(default) });
        self
    }

    /// Prepends the conventional receiver parameter of a bound method, so
    /// the receiver unifies like an implicit first positional argument.
    #[must_use]
    pub fn receiver(mut self) -> Self {
        self.params.insert(0, Param { name: "self".into(), default: None });
        self
    }
}

/// Unifies positional and keyword arguments into one name-keyed mapping.
///
/// Positional arguments match parameters left-to-right. Parameters left
/// unfilled take their declared default; a parameter with neither a value
/// nor a default is simply absent from the result. Keyword arguments always
/// win over positionally or default-filled values for the same name. Names
/// in `ignore` are removed from the result.
#[must_use]
pub fn unify_args(
    signature: &Signature,
    args: &[Value],
    kwargs: &[(&str, Value)],
    ignore: &[&str],
) -> ArgMap {
    let mut result: ArgMap =
        kwargs.iter().map(|(name, value)| ((*name).to_string(), value.clone())).collect();
    if signature.variadic {
        result.insert(VARIADIC_KEY.to_string(), Value::Array(args.to_vec()));
    } else {
        for (index, param) in signature.params.iter().enumerate() {
            let value = match args.get(index) {
                Some(arg) => Some(arg.clone()),
                None => param.default.clone(),
            };
            if let Some(value) = value {
                result.entry(param.name.clone()).or_insert(value);
            }
        }
    }
    for name in ignore {
        result.remove(*name);
    }
    result
}

/// Wraps a function so every invocation's unified arguments are recorded.
///
/// The log only ever grows; [`LoggedFn::calls`] snapshots it.
pub struct LoggedFn<F> {
    signature: Signature,
    calls: Mutex<Vec<ArgMap>>,
    inner: F,
}

impl<F> LoggedFn<F> {
    pub fn new(signature: Signature, inner: F) -> Self {
        Self { signature, calls: Mutex::new(Vec::new()), inner }
    }

    /// Unified arguments of every call made so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<ArgMap> {
        self.calls.lock().unwrap().clone()
    }

    /// Records the call, then delegates to the wrapped function and returns
    /// its result unchanged.
    pub fn call<R>(&self, args: &[Value], kwargs: &[(&str, Value)]) -> R
    where
        F: Fn(&[Value], &[(&str, Value)]) -> R,
    {
        let unified = unify_args(&self.signature, args, kwargs, &[]);
        self.calls.lock().unwrap().push(unified);
        (self.inner)(args, kwargs)
    }
}
