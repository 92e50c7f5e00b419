use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tally_collections::{CollectionError, DynArray};

/// Matches the performance harness: sorts 1k integers and appends 10k.
const SORT_SIZE: usize = 1_000;
const BULK: usize = 10_000;

/// The caller-side sort the array is designed around: only `get` and `swap`.
fn bubble_sort<T: Ord>(array: &mut DynArray<T>) -> tally_collections::Result<()> {
    let len = array.len();
    for i in 0..len {
        for j in 0..len - 1 - i {
            if array.get(j)? > array.get(j + 1)? {
                array.swap(j, j + 1)?;
            }
        }
    }
    Ok(())
}

#[derive(Debug, Clone)]
enum ArrayOp {
    Push(i32),
    Pop,
    Get(usize),
    Set(usize, i32),
    Swap(usize, usize),
}

fn array_op_strategy() -> impl Strategy<Value = ArrayOp> {
    // Indices run past the usual length so out-of-range paths are exercised.
    prop_oneof![
        5 => any::<i32>().prop_map(ArrayOp::Push),
        1 => Just(ArrayOp::Pop),
        3 => (0usize..64).prop_map(ArrayOp::Get),
        2 => (0usize..64, any::<i32>()).prop_map(|(i, v)| ArrayOp::Set(i, v)),
        2 => (0usize..64, 0usize..64).prop_map(|(a, b)| ArrayOp::Swap(a, b)),
    ]
}

// ─── Model-based ─────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn ops_match_vec(ops in prop::collection::vec(array_op_strategy(), 0..500)) {
        let mut array = DynArray::new();
        let mut model: Vec<i32> = Vec::new();

        for op in &ops {
            let len = model.len();
            let out_of_range = |index| CollectionError::OutOfRange { index, len };
            match *op {
                ArrayOp::Push(v) => {
                    array.push(v);
                    model.push(v);
                }
                ArrayOp::Pop => {
                    prop_assert_eq!(array.pop(), model.pop());
                }
                ArrayOp::Get(i) => {
                    prop_assert_eq!(array.get(i), model.get(i).ok_or(out_of_range(i)));
                }
                ArrayOp::Set(i, v) => {
                    let expected = model.get_mut(i).map(|slot| std::mem::replace(slot, v)).ok_or(out_of_range(i));
                    prop_assert_eq!(array.set(i, v), expected);
                }
                ArrayOp::Swap(a, b) => {
                    let expected = if a >= len {
                        Err(out_of_range(a))
                    } else if b >= len {
                        Err(out_of_range(b))
                    } else {
                        model.swap(a, b);
                        Ok(())
                    };
                    prop_assert_eq!(array.swap(a, b), expected);
                }
            }
            prop_assert_eq!(array.as_slice(), model.as_slice());
            prop_assert!(array.capacity() >= array.len());
        }
    }

    #[test]
    fn bubble_sort_agrees_with_std(values in prop::collection::vec(any::<i16>(), 0..200)) {
        let mut array: DynArray<_> = values.iter().copied().collect();
        bubble_sort(&mut array).unwrap();

        let mut expected = values;
        expected.sort_unstable();
        prop_assert_eq!(array.into_vec(), expected);
    }
}

// ─── Contract ────────────────────────────────────────────────────────────────

#[test]
fn get_past_end_is_an_error() {
    let array: DynArray<_> = [10, 20, 30].into_iter().collect();
    assert_eq!(array.get(2), Ok(&30));
    assert_eq!(array.get(3), Err(CollectionError::OutOfRange { index: 3, len: 3 }));
    assert_eq!(
        DynArray::<u8>::new().get(0),
        Err(CollectionError::OutOfRange { index: 0, len: 0 })
    );
}

#[test]
fn out_of_range_message_names_index_and_len() {
    let array: DynArray<u8> = DynArray::new();
    let err = array.get(7).unwrap_err();
    assert_eq!(err.to_string(), "index 7 out of range for length 0");
}

#[test]
fn failed_swap_leaves_array_untouched() {
    let mut array: DynArray<_> = [1, 2, 3].into_iter().collect();
    assert_eq!(array.swap(0, 5), Err(CollectionError::OutOfRange { index: 5, len: 3 }));
    assert_eq!(array.as_slice(), &[1, 2, 3]);
}

#[test]
fn set_returns_previous_item() {
    let mut array: DynArray<_> = ["food", "rent"].into_iter().collect();
    assert_eq!(array.set(1, "fuel"), Ok("rent"));
    assert_eq!(array[1], "fuel");
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn indexing_past_end_panics() {
    let array: DynArray<u8> = DynArray::new();
    let _ = array[0];
}

// ─── Bulk ────────────────────────────────────────────────────────────────────

#[test]
fn bulk_push_grows_geometrically() {
    let mut array = DynArray::new();
    let mut reallocations = 0;
    let mut capacity = array.capacity();
    for i in 0..BULK {
        array.push(i);
        if array.capacity() != capacity {
            reallocations += 1;
            capacity = array.capacity();
        }
    }
    assert_eq!(array.len(), BULK);
    // 4, 8, 16, ... 16384
    assert!(reallocations <= 13, "{reallocations} reallocations");
    assert!(array.iter().copied().eq(0..BULK));
}

#[test]
fn bubble_sort_of_descending_run() {
    let mut array: DynArray<_> = (0..SORT_SIZE).rev().collect();
    bubble_sort(&mut array).unwrap();
    assert!(array.iter().copied().eq(0..SORT_SIZE));
}
