use argspec_core::{
    choice, list, tuple, vector, Annotation, Arguments, CallArgs, CallError, DType, Signature, SignatureError,
    Spec, Tensor, TypeDescriptor, Validated, Validator, Value,
};
use rayon::prelude::*;

fn my_function() -> Validated<impl Fn(&Arguments) -> Value + Sync> {
    Signature::builder("my_function")
        .param("a", choice!("xx", TypeDescriptor::Bool).unwrap())
        .param_with_default("b", TypeDescriptor::Str, "bb")
        .param_with_default("c", vector(DType::Float, Some(2)), tuple![4.0, 4])
        .param_with_default("d", TypeDescriptor::Tuple(vec![TypeDescriptor::Str, TypeDescriptor::Bool]), tuple!["yes", true])
        .param_with_default("e", TypeDescriptor::Float, 22.0)
        .build()
        .unwrap()
        .decorate(|args: &Arguments| args.get("a").cloned().unwrap_or(Value::None))
}

fn rejected_parameter(result: Result<Value, CallError>) -> Option<String> {
    result.err().and_then(|e| e.argument().map(|a| a.parameter().to_string()))
}

#[test]
fn choice_parameter_end_to_end() {
    let f = my_function();
    assert_eq!(f.call(CallArgs::new().arg("xx")), Ok(Value::from("xx")));
    assert_eq!(f.call(CallArgs::new().arg(true)), Ok(Value::Bool(true)));
    assert_eq!(rejected_parameter(f.call(CallArgs::new().arg(233))), Some("a".to_string()));
    assert_eq!(rejected_parameter(f.call(CallArgs::new().arg("xx").arg(35))), Some("b".to_string()));
}

#[test]
fn rejection_renders_report() {
    let err = my_function().call(CallArgs::new().arg("xx").arg("whatevs").arg(list![1, 2, 3])).unwrap_err();
    let expected = "Argument did not match parameter annotation.\n\
                    Function       my_function\n\
                    Parameter      c\n\
                    Annotation     Tensor[float, (2,)]\n\
                    Argument       [1, 2, 3]\n\
                    Argument type  list";
    assert_eq!(err.to_string(), expected);
}

#[test]
fn choice_annotation_renders_all_options() {
    let err = my_function().call(CallArgs::new().arg(233)).unwrap_err();
    let report = err.to_string();
    assert!(report.contains("Annotation     Choice(\"xx\", bool)\n"));
    assert!(report.ends_with("Argument       233\nArgument type  int"));
}

#[test]
fn vector_of_length_two() {
    let v = Validator::from(Tensor::vector(DType::Float, Some(2)));
    assert!(v.validate(&list![1, 2]));
    assert!(v.validate(&tuple![0.1, -3]));
    assert!(!v.validate(&list![1, 2, 3]));
    assert!(!v.validate(&Value::Bool(true)));
}

#[test]
fn invalid_default_fails_at_declaration() {
    let result = Signature::builder("func").param_with_default("a", TypeDescriptor::Float, "jojo").build();
    assert!(matches!(result, Err(SignatureError::InvalidDefault(_))));
}

#[test]
fn validators_from_json_drive_a_signature() {
    let a = Validator::from_json(r#"{"kind": "choice", "options": [{"literal": "xx"}, {"type": "bool"}]}"#).unwrap();
    let c = Validator::from_json(r#"{"kind": "vector", "length": 2}"#).unwrap();
    let f = Signature::builder("configured")
        .param("a", a)
        .param_with_default("c", Annotation::Cast(c), tuple![4.0, 4])
        .build()
        .unwrap()
        .decorate(|args: &Arguments| args.get("c").cloned());

    let Ok(Some(Value::Array(c))) = f.call(CallArgs::new().arg(false)) else { panic!("expected the canonical default") };
    assert_eq!(c.shape(), &[2]);
    assert!(f.call(CallArgs::new().arg("xy")).is_err());
}

#[test]
fn concurrent_calls_share_one_wrapper() {
    let f = my_function();
    let outcomes: Vec<bool> = (0..256i64)
        .into_par_iter()
        .map(|i| {
            let args = if i % 4 == 0 { CallArgs::new().arg(i) } else { CallArgs::new().arg(i % 2 == 0).arg("x") };
            f.call(args).is_ok()
        })
        .collect();
    assert_eq!(outcomes.iter().filter(|ok| !**ok).count(), 64);
}
