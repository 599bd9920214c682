//! SWRL built-ins construction and evaluation on binding tables.

use oxrdf::vocab::xsd;
use oxrdf::{Literal, NamedNode, Term, Variable};
use oxreason::{BindingTable, BuiltIn, BuiltInArgument, BuiltInError, BuiltInKind};

fn typed(value: &str, datatype: oxrdf::NamedNodeRef<'_>) -> Option<Term> {
    Some(Literal::new_typed_literal(value, datatype).into())
}

fn iri(value: &str) -> Option<Term> {
    Some(NamedNode::new(value).unwrap().into())
}

#[test]
fn test_construction_with_missing_arguments_fails() {
    let l = Variable::new("L").unwrap();
    let r = Variable::new("R").unwrap();
    for kind in BuiltInKind::ALL {
        let missing_left = if kind.takes_parameter() {
            BuiltIn::with_parameter(kind, None, Some(r.clone()), 2.0)
        } else {
            BuiltIn::new(kind, None, Some(r.clone().into()))
        };
        assert!(matches!(
            missing_left,
            Err(BuiltInError::MissingLeftArgument { .. })
        ));
        let missing_right = if kind.takes_parameter() {
            BuiltIn::with_parameter(kind, Some(l.clone()), None, 2.0)
        } else {
            BuiltIn::new(kind, Some(l.clone()), None)
        };
        assert!(matches!(
            missing_right,
            Err(BuiltInError::MissingRightArgument { .. })
        ));
    }
}

#[test]
fn test_construction_errors() {
    let l = Variable::new("L").unwrap();
    let r = Variable::new("R").unwrap();
    assert!(matches!(
        BuiltIn::new(BuiltInKind::Multiply, Some(l.clone()), Some(r.clone().into())),
        Err(BuiltInError::MissingParameter { .. })
    ));
    assert!(matches!(
        BuiltIn::with_parameter(BuiltInKind::Equal, Some(l.clone()), Some(r), 2.0),
        Err(BuiltInError::UnexpectedParameter { .. })
    ));
    assert!(matches!(
        BuiltIn::matches(l.clone(), "("),
        Err(BuiltInError::InvalidRegex { .. })
    ));
    assert!(matches!(
        BuiltIn::comparison(BuiltInKind::StartsWith, l, "a"),
        Err(BuiltInError::UnexpectedKind { .. })
    ));
}

#[test]
fn test_multiply_scenario() {
    let x = Variable::new("X").unwrap();
    let y = Variable::new("Y").unwrap();
    let table = BindingTable::from_rows(
        [x.clone(), y.clone()],
        [
            vec![typed("12.00", xsd::FLOAT), typed("6.00", xsd::DOUBLE)],
            vec![typed("2", xsd::INTEGER), typed("3.57", xsd::DOUBLE)],
        ],
    );
    let multiply = BuiltIn::multiply(x, y, 2.0);
    assert_eq!(
        multiply.to_string(),
        "swrlb:multiply(?X,?Y,\"2\"^^xsd:double)"
    );
    let result = multiply.evaluate(&table);
    assert_eq!(result.len(), 1);
    assert_eq!(
        result.rows().next().unwrap().values(),
        table.rows().next().unwrap().values()
    );
}

#[test]
fn test_starts_with_scenario() {
    let c = Variable::new("C").unwrap();
    let table = BindingTable::from_rows(
        [c.clone()],
        [
            vec![iri("ex1:indiv")],
            vec![iri("ex2:indiv2")],
            vec![iri("ex2:indiV2")],
        ],
    );
    let starts_with = BuiltIn::starts_with(c, "ex1");
    assert_eq!(starts_with.to_string(), "swrlb:startsWith(?C,\"ex1\")");
    let result = starts_with.evaluate(&table);
    assert_eq!(result.len(), 1);
    assert_eq!(result.rows().next().unwrap().values(), [iri("ex1:indiv")]);
}

#[test]
fn test_evaluation_is_idempotent() {
    let x = Variable::new("X").unwrap();
    let y = Variable::new("Y").unwrap();
    let table = BindingTable::from_rows(
        [x.clone(), y.clone()],
        [
            vec![typed("1", xsd::INTEGER), typed("2", xsd::INTEGER)],
            vec![typed("3", xsd::INTEGER), typed("2.5", xsd::DECIMAL)],
            vec![typed("2", xsd::INTEGER), None],
            vec![Some(Literal::from("a").into()), typed("2", xsd::INTEGER)],
        ],
    );
    let built_ins = [
        BuiltIn::comparison(BuiltInKind::LessThan, x.clone(), y.clone()).unwrap(),
        BuiltIn::comparison(BuiltInKind::GreaterThan, x.clone(), y.clone()).unwrap(),
        BuiltIn::new(
            BuiltInKind::NotEqual,
            Some(x.clone()),
            Some(BuiltInArgument::Literal(Literal::from(3))),
        )
        .unwrap(),
        BuiltIn::matches(x, "^[0-9]+$").unwrap(),
    ];
    for built_in in built_ins {
        let once = built_in.evaluate(&table);
        assert_eq!(built_in.evaluate(&table), once);
        assert_eq!(built_in.evaluate(&once), once);
        assert_eq!(once.variables(), table.variables());
    }
}

#[test]
fn test_comparison_across_numeric_types() {
    let x = Variable::new("X").unwrap();
    let table = BindingTable::from_rows(
        [x.clone()],
        [
            vec![typed("1.0", xsd::DOUBLE)],
            vec![typed("1", xsd::INTEGER)],
            vec![typed("1.50", xsd::DECIMAL)],
        ],
    );
    let equal = BuiltIn::comparison(BuiltInKind::Equal, x, Literal::from(1)).unwrap();
    assert_eq!(equal.evaluate(&table).len(), 2);
}
