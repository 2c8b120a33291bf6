use proptest::prelude::*;
use ragged_array::{Builder, DataType, Error, Item, Result};


#[test]
fn nulls_only_stay_shapeless() -> Result<()> {
    let mut b = Builder::default();
    b.null()?;
    b.null()?;
    b.null()?;

    assert_eq!(b.data_type(), DataType::Null);
    let array = b.finish();
    assert_eq!(array.len(), 3);
    assert_eq!(array.at(0)?, Item::Null);
    Ok(())
}


#[test]
fn null_then_value_back_fills() -> Result<()> {
    let mut b = Builder::default();
    b.null()?;
    b.null()?;
    b.integer(5)?;

    assert_eq!(b.data_type(), DataType::Int64);
    let array = b.finish();
    assert_eq!(array.at(0)?, Item::Null);
    assert_eq!(array.at(1)?, Item::Null);
    assert_eq!(array.at(2)?, Item::Int64(5));
    Ok(())
}


#[test]
fn integer_then_real_widens_in_place() -> Result<()> {
    let mut b = Builder::default();
    b.integer(1)?;
    b.integer(2)?;
    b.integer(3)?;
    b.real(4.5)?;

    assert_eq!(b.data_type(), DataType::Float64);
    let array = b.finish();
    assert_eq!(array.len(), 4);
    assert_eq!(array.at(0)?, Item::Float64(1.0));
    assert_eq!(array.at(2)?, Item::Float64(3.0));
    assert_eq!(array.at(3)?, Item::Float64(4.5));
    Ok(())
}


#[test]
fn real_column_accepts_integers() -> Result<()> {
    let mut b = Builder::default();
    b.real(0.5)?;
    b.integer(2)?;

    assert_eq!(b.data_type(), DataType::Float64);
    let array = b.finish();
    assert_eq!(array.at(1)?, Item::Float64(2.0));
    Ok(())
}


#[test]
fn null_never_forces_promotion() -> Result<()> {
    let mut b = Builder::default();
    b.integer(1)?;
    b.null()?;
    b.integer(2)?;

    assert_eq!(b.data_type(), DataType::Int64);
    let array = b.finish();
    assert_eq!(array.at(0)?, Item::Int64(1));
    assert_eq!(array.at(1)?, Item::Null);
    assert_eq!(array.at(2)?, Item::Int64(2));
    Ok(())
}


#[test]
fn integer_then_boolean_falls_back_to_union() -> Result<()> {
    let mut b = Builder::default();
    b.integer(1)?;
    b.boolean(true)?;
    b.null()?;

    assert_eq!(
        b.data_type(),
        DataType::Union(vec![DataType::Int64, DataType::Boolean])
    );
    let array = b.finish();
    assert_eq!(array.len(), 3);
    assert_eq!(array.at(0)?, Item::Int64(1));
    assert_eq!(array.at(1)?, Item::Boolean(true));
    assert_eq!(array.at(2)?, Item::Null);
    Ok(())
}


#[test]
fn union_reuses_matching_alternative() -> Result<()> {
    let mut b = Builder::default();
    b.integer(1)?;
    b.boolean(true)?;
    b.integer(2)?;
    b.boolean(false)?;

    // no third alternative appears
    assert_eq!(
        b.data_type(),
        DataType::Union(vec![DataType::Int64, DataType::Boolean])
    );
    let array = b.finish();
    assert_eq!(array.at(2)?, Item::Int64(2));
    assert_eq!(array.at(3)?, Item::Boolean(false));
    Ok(())
}


#[test]
fn lists_of_integers() -> Result<()> {
    let mut b = Builder::default();
    b.begin_list()?;
    b.integer(1)?;
    b.integer(2)?;
    b.end_list()?;
    b.null()?;
    b.begin_list()?;
    b.end_list()?;

    assert_eq!(b.data_type(), DataType::List(Box::new(DataType::Int64)));
    let array = b.finish();
    assert_eq!(array.len(), 3);

    match array.at(0)? {
        Item::List(values) => {
            assert_eq!(values.len(), 2);
            assert_eq!(values.at(0)?, Item::Int64(1));
            assert_eq!(values.at(1)?, Item::Int64(2));
        }
        other => panic!("expected a list, got {:?}", other),
    }
    assert_eq!(array.at(1)?, Item::Null);
    match array.at(2)? {
        Item::List(values) => assert_eq!(values.len(), 0),
        other => panic!("expected a list, got {:?}", other),
    }
    Ok(())
}


#[test]
fn open_list_is_not_counted() -> Result<()> {
    let mut b = Builder::default();
    b.begin_list()?;
    b.integer(1)?;

    assert_eq!(b.len(), 0);
    let snapshot = b.snapshot();
    assert_eq!(snapshot.len(), 0);

    b.end_list()?;
    assert_eq!(b.len(), 1);
    Ok(())
}


#[test]
fn stray_close_is_rejected_and_harmless() -> Result<()> {
    let mut b = Builder::default();
    b.integer(1)?;
    let before = b.snapshot();

    assert!(matches!(b.end_list(), Err(Error::Sequence(_))));
    assert!(matches!(b.end_tuple(), Err(Error::Sequence(_))));
    assert!(matches!(b.end_record(), Err(Error::Sequence(_))));
    assert!(matches!(b.index(0), Err(Error::Sequence(_))));
    assert!(matches!(b.field("x"), Err(Error::Sequence(_))));

    assert_eq!(b.len(), 1);
    assert_eq!(b.snapshot(), before);
    Ok(())
}


#[test]
fn value_without_selected_tuple_slot_is_rejected() -> Result<()> {
    let mut b = Builder::default();
    b.begin_tuple(2)?;
    assert!(matches!(b.integer(1), Err(Error::Sequence(_))));

    b.index(0)?;
    b.integer(1)?;
    // the slot is spent, a second value needs a fresh index()
    assert!(matches!(b.integer(2), Err(Error::Sequence(_))));

    b.end_tuple()?;
    assert_eq!(b.len(), 1);
    Ok(())
}


#[test]
fn clear_keeps_the_learned_shape() -> Result<()> {
    let mut b = Builder::default();
    b.integer(1)?;
    b.real(2.5)?;
    b.clear();

    assert_eq!(b.len(), 0);
    assert_eq!(b.data_type(), DataType::Float64);

    b.integer(3)?;
    let array = b.finish();
    assert_eq!(array.len(), 1);
    assert_eq!(array.at(0)?, Item::Float64(3.0));
    Ok(())
}


#[test]
fn clear_then_rebuild_reproduces_the_array() -> Result<()> {
    fn feed(b: &mut Builder) -> Result<()> {
        b.begin_list()?;
        b.integer(1)?;
        b.real(2.5)?;
        b.end_list()?;
        b.null()?;
        Ok(())
    }

    let mut b = Builder::default();
    feed(&mut b)?;
    let first = b.snapshot();

    b.clear();
    feed(&mut b)?;
    let second = b.finish();

    assert_eq!(first, second);
    Ok(())
}


#[test]
fn record_fields_by_name() -> Result<()> {
    let mut b = Builder::default();
    b.begin_record(7)?;
    b.field("a")?;
    b.integer(1)?;
    b.field("b")?;
    b.boolean(true)?;
    b.end_record()?;
    b.begin_record(7)?;
    b.field("b")?;
    b.boolean(false)?;
    b.end_record()?;

    let array = b.finish();
    assert_eq!(array.len(), 2);
    assert_eq!(
        array.at(1)?,
        Item::Record(vec![
            ("a".to_string(), Item::Null),
            ("b".to_string(), Item::Boolean(false)),
        ])
    );

    let a = array.field("a")?;
    assert_eq!(a.at(0)?, Item::Int64(1));
    assert_eq!(a.at(1)?, Item::Null);
    Ok(())
}


#[test]
fn late_record_field_is_null_for_prior_elements() -> Result<()> {
    let mut b = Builder::default();
    b.begin_record(1)?;
    b.field("a")?;
    b.integer(1)?;
    b.end_record()?;
    b.begin_record(1)?;
    b.field("a")?;
    b.integer(2)?;
    b.field("b")?;
    b.real(0.5)?;
    b.end_record()?;

    let array = b.finish();
    let late = array.field("b")?;
    assert_eq!(late.at(0)?, Item::Null);
    assert_eq!(late.at(1)?, Item::Float64(0.5));
    Ok(())
}


#[test]
fn record_disambiguator_separates_shapes() -> Result<()> {
    let mut b = Builder::default();
    b.begin_record(1)?;
    b.field("a")?;
    b.integer(1)?;
    b.end_record()?;
    b.begin_record(2)?;
    b.field("a")?;
    b.integer(2)?;
    b.end_record()?;

    // same field set, different identity
    assert!(matches!(b.data_type(), DataType::Union(alts) if alts.len() == 2));
    let array = b.finish();
    assert_eq!(
        array.at(0)?,
        Item::Record(vec![("a".to_string(), Item::Int64(1))])
    );
    assert_eq!(
        array.at(1)?,
        Item::Record(vec![("a".to_string(), Item::Int64(2))])
    );
    Ok(())
}


#[test]
fn tuple_slots_by_position() -> Result<()> {
    let mut b = Builder::default();
    b.begin_tuple(2)?;
    b.index(0)?;
    b.integer(1)?;
    b.index(1)?;
    b.boolean(true)?;
    b.end_tuple()?;
    b.begin_tuple(2)?;
    b.index(1)?;
    b.boolean(false)?;
    b.end_tuple()?;

    assert_eq!(
        b.data_type(),
        DataType::Tuple(vec![DataType::Int64, DataType::Boolean])
    );
    let array = b.finish();
    assert_eq!(
        array.at(0)?,
        Item::Tuple(vec![Item::Int64(1), Item::Boolean(true)])
    );
    assert_eq!(
        array.at(1)?,
        Item::Tuple(vec![Item::Null, Item::Boolean(false)])
    );
    Ok(())
}


#[test]
fn tuple_arity_mismatch_falls_back_to_union() -> Result<()> {
    let mut b = Builder::default();
    b.begin_tuple(2)?;
    b.index(0)?;
    b.integer(1)?;
    b.end_tuple()?;
    b.begin_tuple(3)?;
    b.index(2)?;
    b.integer(9)?;
    b.end_tuple()?;

    assert!(matches!(b.data_type(), DataType::Union(alts) if alts.len() == 2));
    let array = b.finish();
    assert_eq!(
        array.at(1)?,
        Item::Tuple(vec![Item::Null, Item::Null, Item::Int64(9)])
    );
    Ok(())
}


#[test]
fn promotion_stays_local_to_the_divergent_node() -> Result<()> {
    let mut b = Builder::default();
    b.begin_list()?;
    b.integer(1)?;
    b.end_list()?;
    b.begin_list()?;
    b.boolean(true)?;
    b.end_list()?;

    // the list itself is untouched, only its values promote
    assert_eq!(
        b.data_type(),
        DataType::List(Box::new(DataType::Union(vec![
            DataType::Int64,
            DataType::Boolean
        ])))
    );
    Ok(())
}


#[test]
fn field_promotion_leaves_siblings_alone() -> Result<()> {
    let mut b = Builder::default();
    b.begin_record(1)?;
    b.field("a")?;
    b.integer(1)?;
    b.field("b")?;
    b.integer(2)?;
    b.end_record()?;
    b.begin_record(1)?;
    b.field("a")?;
    b.integer(3)?;
    b.field("b")?;
    b.boolean(true)?;
    b.end_record()?;

    assert_eq!(
        b.data_type(),
        DataType::Record(vec![
            ("a".to_string(), DataType::Int64),
            (
                "b".to_string(),
                DataType::Union(vec![DataType::Int64, DataType::Boolean])
            ),
        ])
    );
    Ok(())
}


#[test]
fn union_of_scalar_and_list() -> Result<()> {
    let mut b = Builder::default();
    b.integer(1)?;
    b.begin_list()?;
    b.integer(2)?;
    b.integer(3)?;
    b.end_list()?;
    b.integer(4)?;

    assert_eq!(
        b.data_type(),
        DataType::Union(vec![
            DataType::Int64,
            DataType::List(Box::new(DataType::Int64))
        ])
    );
    let array = b.finish();
    assert_eq!(array.at(0)?, Item::Int64(1));
    match array.at(1)? {
        Item::List(values) => {
            assert_eq!(values.len(), 2);
            assert_eq!(values.at(0)?, Item::Int64(2));
        }
        other => panic!("expected a list, got {:?}", other),
    }
    assert_eq!(array.at(2)?, Item::Int64(4));
    Ok(())
}


#[test]
fn nested_lists() -> Result<()> {
    let mut b = Builder::default();
    b.begin_list()?;
    b.begin_list()?;
    b.integer(1)?;
    b.integer(2)?;
    b.end_list()?;
    b.begin_list()?;
    b.integer(3)?;
    b.end_list()?;
    b.end_list()?;

    let array = b.finish();
    assert_eq!(array.len(), 1);
    assert_eq!(array.minmax_depth(), (3, 3));

    match array.at(0)? {
        Item::List(outer) => {
            assert_eq!(outer.len(), 2);
            match outer.at(1)? {
                Item::List(inner) => assert_eq!(inner.at(0)?, Item::Int64(3)),
                other => panic!("expected a list, got {:?}", other),
            }
        }
        other => panic!("expected a list, got {:?}", other),
    }
    Ok(())
}


#[test]
fn snapshot_is_unaffected_by_later_appends() -> Result<()> {
    let mut b = Builder::default();
    b.integer(1)?;
    b.integer(2)?;
    let snapshot = b.snapshot();

    b.integer(3)?;
    b.boolean(true)?;

    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.data_type(), DataType::Int64);
    assert_eq!(snapshot.at(1)?, Item::Int64(2));
    Ok(())
}


#[test]
fn finish_agrees_with_snapshot() -> Result<()> {
    let mut b = Builder::default();
    b.begin_record(3)?;
    b.field("x")?;
    b.begin_list()?;
    b.integer(1)?;
    b.real(2.5)?;
    b.end_list()?;
    b.end_record()?;
    b.null()?;

    let snapshot = b.snapshot();
    let finished = b.finish();
    assert_eq!(snapshot, finished);
    Ok(())
}


proptest! {
    #[test]
    fn list_lengths_round_trip(lens in prop::collection::vec(0usize..20, 1..50)) {
        let mut b = Builder::default();
        let mut next = 0i64;
        for &len in lens.iter() {
            b.begin_list().unwrap();
            for _ in 0..len {
                b.integer(next).unwrap();
                next += 1;
            }
            b.end_list().unwrap();
        }

        let array = b.finish();
        prop_assert_eq!(array.len(), lens.len());

        let mut expected = 0i64;
        for (i, &len) in lens.iter().enumerate() {
            match array.at(i).unwrap() {
                Item::List(values) => {
                    prop_assert_eq!(values.len(), len);
                    for j in 0..len {
                        prop_assert_eq!(values.at(j).unwrap(), Item::Int64(expected));
                        expected += 1;
                    }
                }
                other => prop_assert!(false, "expected a list, got {:?}", other),
            }
        }
    }

    #[test]
    fn mixed_numbers_widen_exactly(
        values in prop::collection::vec(
            prop_oneof![
                any::<i32>().prop_map(|v| Some(v as f64)),
                (-1000.0f64..1000.0).prop_map(Some),
                Just(None),
            ],
            1..100
        )
    ) {
        let mut b = Builder::default();
        for value in values.iter() {
            match value {
                Some(v) if v.fract() == 0.0 && v.abs() < 1e15 => b.integer(*v as i64).unwrap(),
                Some(v) => b.real(*v).unwrap(),
                None => b.null().unwrap(),
            }
        }

        let array = b.finish();
        prop_assert_eq!(array.len(), values.len());
        for (i, value) in values.iter().enumerate() {
            let item = array.at(i).unwrap();
            match (value, item) {
                (None, Item::Null) => {}
                (Some(v), Item::Int64(got)) => prop_assert_eq!(got as f64, *v),
                (Some(v), Item::Float64(got)) => prop_assert_eq!(got, *v),
                (value, item) => {
                    prop_assert!(false, "expected {:?}, got {:?}", value, item)
                }
            }
        }
    }
}
