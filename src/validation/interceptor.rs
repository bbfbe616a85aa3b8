//! Call-time interception: bind, validate in declaration order, forward.
use super::error::CallError;
use super::signature::{Annotation, Signature, Slot};
use crate::value::Value;
use tracing::{debug, instrument, trace};

/// Whether `value` satisfies `annotation`.
pub fn validate(value: &Value, annotation: &Annotation) -> bool {
    annotation.validate(value)
}

/// Arguments of one call, as the caller supplied them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    positional: Vec<Value>,
    keyword: Vec<(String, Value)>,
}

impl CallArgs {
    pub fn new() -> Self { Self::default() }

    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keyword.push((name.into(), value.into()));
        self
    }

    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    pub fn keyword(&self) -> &[(String, Value)] {
        &self.keyword
    }
}

/// What the wrapped function receives.
#[derive(Debug, Clone, PartialEq)]
pub struct Arguments {
    positional: Vec<Value>,
    keyword: Vec<(String, Value)>,
    bound: Vec<(String, Value)>,
}

impl Arguments {
    /// The value of a parameter, falling back to its declared default.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bound.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Positional arguments as forwarded.
    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    /// Keyword arguments as forwarded, in call order.
    pub fn keyword(&self) -> &[(String, Value)] {
        &self.keyword
    }

    /// Every parameter with its value, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.bound.iter().map(|(n, v)| (n.as_str(), v))
    }
}

/// A function wrapped with argument validation.
#[derive(Debug, Clone)]
pub struct Validated<F> {
    signature: Signature,
    function: F,
}

/// Wraps `function` so every call is checked against `signature` first.
pub fn decorate<F, R>(signature: Signature, function: F) -> Validated<F>
where
    F: Fn(&Arguments) -> R,
{
    Validated { signature, function }
}

impl Signature {
    pub fn decorate<F, R>(self, function: F) -> Validated<F>
    where
        F: Fn(&Arguments) -> R,
    {
        decorate(self, function)
    }
}

impl<F> Validated<F> {
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Binds and validates `args`, then invokes the wrapped function.
    ///
    /// Parameters are checked in declaration order and the first failure is
    /// returned; later arguments are not inspected. Arguments are forwarded
    /// unchanged except where the annotation is `Cast`.
    #[instrument(level = "trace", skip_all, fields(function = %self.signature.name()))]
    pub fn call<R>(&self, args: CallArgs) -> Result<R, CallError>
    where
        F: Fn(&Arguments) -> R,
    {
        let slots = self.signature.bind(&args)?;
        let CallArgs { mut positional, mut keyword } = args;

        for (param, slot) in self.signature.params().iter().zip(&slots) {
            let value = match *slot {
                Slot::Positional(i) => &mut positional[i],
                Slot::Keyword(i) => &mut keyword[i].1,
                Slot::Default => continue,
            };
            match param.check(self.signature.name(), value) {
                Ok(Some(canonical)) => {
                    trace!(parameter = %param.name(), "argument cast");
                    *value = canonical;
                }
                Ok(None) => trace!(parameter = %param.name(), "argument accepted"),
                Err(err) => {
                    debug!(parameter = %param.name(), value = %value, "call rejected");
                    return Err(err.into());
                }
            }
        }

        let bound = self
            .signature
            .params()
            .iter()
            .zip(&slots)
            .map(|(param, slot)| {
                let value = match *slot {
                    Slot::Positional(i) => positional[i].clone(),
                    Slot::Keyword(i) => keyword[i].1.clone(),
                    Slot::Default => param.default().cloned().unwrap_or(Value::None),
                };
                (param.name().to_string(), value)
            })
            .collect();

        let arguments = Arguments { positional, keyword, bound };
        Ok((self.function)(&arguments))
    }
}
