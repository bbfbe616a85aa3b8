//! Explicit function signatures: parameters, annotations and defaults.
use super::error::{ArgumentError, BindError, SignatureError};
use super::interceptor::CallArgs;
use crate::spec::{Choice, ConfigError, DimensionSize, Shape, Spec, Tensor, TypePredicate, Validator};
use crate::type_system::{conforms, TypeDescriptor};
use crate::value::Value;
use tracing::{debug, trace};

/// What a parameter's argument must satisfy.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Annotation {
    /// Every argument passes.
    #[default]
    Unconstrained,
    /// The argument must conform to a bare type.
    Type(TypeDescriptor),
    /// The argument must pass a validator and is forwarded unchanged.
    Spec(Validator),
    /// The argument must pass a validator and is replaced by its canonical cast.
    Cast(Validator),
}

impl Annotation {
    /// An annotation that substitutes the canonical value for the argument.
    pub fn cast(validator: impl Into<Validator>) -> Self {
        Annotation::Cast(validator.into())
    }

    pub fn validate(&self, value: &Value) -> bool {
        match self {
            Annotation::Unconstrained => true,
            Annotation::Type(ty) => conforms(value, ty),
            Annotation::Spec(validator) | Annotation::Cast(validator) => validator.validate(value),
        }
    }

    fn check_well_formed(&self) -> Result<(), ConfigError> {
        match self {
            Annotation::Type(ty) => ty.check_well_formed(),
            _ => Ok(()),
        }
    }
}

impl From<TypeDescriptor> for Annotation {
    fn from(v: TypeDescriptor) -> Self { Annotation::Type(v) }
}

impl From<Validator> for Annotation {
    fn from(v: Validator) -> Self { Annotation::Spec(v) }
}

macro_rules! spec_annotations {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Annotation {
                fn from(v: $ty) -> Self { Annotation::Spec(Validator::from(v)) }
            }
        )*
    };
}

spec_annotations!(TypePredicate, Choice, DimensionSize, Shape, Tensor);

/// One declared parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    name: String,
    annotation: Annotation,
    default: Option<Value>,
}

impl Param {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn annotation(&self) -> &Annotation {
        &self.annotation
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Checks `value`, returning the canonical replacement for `Cast` annotations.
    pub(crate) fn check(&self, function: &str, value: &Value) -> Result<Option<Value>, ArgumentError> {
        let reject = || ArgumentError::new(function, self.name.as_str(), self.annotation.clone(), value.clone());
        if !self.annotation.validate(value) {
            return Err(reject());
        }
        match &self.annotation {
            Annotation::Cast(validator) => validator.cast(value).map(Some).map_err(|cause| {
                trace!(parameter = %self.name, %cause, "canonical cast failed");
                reject()
            }),
            _ => Ok(None),
        }
    }
}

/// Where a parameter's value comes from in a particular call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// The i-th positional argument.
    Positional(usize),
    /// The i-th keyword argument.
    Keyword(usize),
    /// The declared default.
    Default,
}

/// An ordered parameter list, built once when a function is registered.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    name: String,
    params: Vec<Param>,
}

impl Signature {
    pub fn builder(name: impl Into<String>) -> SignatureBuilder {
        SignatureBuilder { name: name.into(), params: Vec::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Checks one value against the named parameter's annotation.
    ///
    /// Names the signature does not declare are unconstrained.
    pub fn check_arg(&self, name: &str, value: &Value) -> Result<(), ArgumentError> {
        match self.param(name) {
            Some(param) => param.check(&self.name, value).map(|_| ()),
            None => Ok(()),
        }
    }

    /// Pairs call arguments with parameters: positionals by position,
    /// keywords by name. Returns one slot per declared parameter.
    pub fn bind(&self, args: &CallArgs) -> Result<Vec<Slot>, BindError> {
        let given = args.positional().len();
        if given > self.params.len() {
            return Err(BindError::TooManyPositional {
                function: self.name.clone(),
                expected: self.params.len(),
                given,
            });
        }

        let mut slots: Vec<Option<Slot>> = (0..self.params.len())
            .map(|i| (i < given).then_some(Slot::Positional(i)))
            .collect();

        for (k, (name, _)) in args.keyword().iter().enumerate() {
            let index = self.params.iter().position(|p| &p.name == name).ok_or_else(|| {
                BindError::UnknownKeyword { function: self.name.clone(), name: name.clone() }
            })?;
            if slots[index].is_some() {
                return Err(BindError::MultipleValues { function: self.name.clone(), name: name.clone() });
            }
            slots[index] = Some(Slot::Keyword(k));
        }

        self.params
            .iter()
            .zip(slots)
            .map(|(param, slot)| match (slot, &param.default) {
                (Some(slot), _) => Ok(slot),
                (None, Some(_)) => Ok(Slot::Default),
                (None, None) => Err(BindError::MissingArgument {
                    function: self.name.clone(),
                    name: param.name.clone(),
                }),
            })
            .collect()
    }
}

/// Accumulates parameters in declaration order.
#[derive(Debug, Clone)]
pub struct SignatureBuilder {
    name: String,
    params: Vec<Param>,
}

impl SignatureBuilder {
    pub fn param(mut self, name: impl Into<String>, annotation: impl Into<Annotation>) -> Self {
        self.params.push(Param { name: name.into(), annotation: annotation.into(), default: None });
        self
    }

    pub fn param_with_default(
        mut self,
        name: impl Into<String>,
        annotation: impl Into<Annotation>,
        default: impl Into<Value>,
    ) -> Self {
        self.params.push(Param {
            name: name.into(),
            annotation: annotation.into(),
            default: Some(default.into()),
        });
        self
    }

    pub fn untyped(self, name: impl Into<String>) -> Self {
        self.param(name, Annotation::Unconstrained)
    }

    /// Finishes the signature, checking every default against its own
    /// annotation. `Cast` defaults are stored in canonical form.
    pub fn build(self) -> Result<Signature, SignatureError> {
        let SignatureBuilder { name, mut params } = self;

        let mut seen_default = false;
        for (i, param) in params.iter().enumerate() {
            if params[..i].iter().any(|p| p.name == param.name) {
                return Err(SignatureError::DuplicateParameter { function: name, name: param.name.clone() });
            }
            if param.default.is_some() {
                seen_default = true;
            } else if seen_default {
                return Err(SignatureError::RequiredAfterDefault { function: name, name: param.name.clone() });
            }
            param.annotation.check_well_formed()?;
        }

        for param in params.iter_mut() {
            let Some(default) = &param.default else { continue };
            if let Some(canonical) = param.check(&name, default).map_err(SignatureError::InvalidDefault)? {
                param.default = Some(canonical);
            }
            debug!(function = %name, parameter = %param.name, "default value checked");
        }

        debug!(function = %name, params = params.len(), "signature registered");
        Ok(Signature { name, params })
    }
}
