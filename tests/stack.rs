use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tally_collections::{CollectionError, Stack};

/// Matches the performance harness: 10k pushes followed by 10k pops.
const BULK: usize = 10_000;

#[derive(Debug, Clone)]
enum StackOp {
    Push(i64),
    Pop,
    Peek,
}

fn stack_op_strategy() -> impl Strategy<Value = StackOp> {
    prop_oneof![
        3 => any::<i64>().prop_map(StackOp::Push),
        2 => Just(StackOp::Pop),
        1 => Just(StackOp::Peek),
    ]
}

// ─── Model-based ─────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn ops_match_vec(ops in prop::collection::vec(stack_op_strategy(), 0..1_000)) {
        let mut stack = Stack::new();
        let mut model: Vec<i64> = Vec::new();

        for op in &ops {
            match *op {
                StackOp::Push(v) => {
                    stack.push(v);
                    model.push(v);
                }
                StackOp::Pop => {
                    prop_assert_eq!(stack.pop(), model.pop().ok_or(CollectionError::EmptyStack));
                }
                StackOp::Peek => {
                    prop_assert_eq!(stack.peek(), model.last().ok_or(CollectionError::EmptyStack));
                }
            }
            prop_assert_eq!(stack.len(), model.len());
        }

        prop_assert!(stack.iter().eq(model.iter().rev()));
    }
}

// ─── Contract ────────────────────────────────────────────────────────────────

#[test]
fn pops_in_reverse_push_order() {
    let mut stack = Stack::new();
    stack.push(1);
    stack.push(2);
    stack.push(3);
    assert_eq!(stack.pop(), Ok(3));
    assert_eq!(stack.pop(), Ok(2));
    assert_eq!(stack.pop(), Ok(1));
    assert_eq!(stack.pop(), Err(CollectionError::EmptyStack));
}

#[test]
fn peek_does_not_remove() {
    let mut stack: Stack<_> = ["undo", "redo"].into_iter().collect();
    assert_eq!(stack.peek(), Ok(&"redo"));
    assert_eq!(stack.len(), 2);
    assert_eq!(stack.pop(), Ok("redo"));
}

#[test]
fn empty_stack_errors() {
    let mut stack: Stack<u8> = Stack::default();
    assert_eq!(stack.peek(), Err(CollectionError::EmptyStack));
    assert_eq!(stack.pop(), Err(CollectionError::EmptyStack));
    assert_eq!(CollectionError::EmptyStack.to_string(), "stack is empty");
}

#[test]
fn iterates_top_down() {
    let stack: Stack<_> = (1..=4).collect();
    assert_eq!(stack.iter().copied().collect::<Vec<_>>(), [4, 3, 2, 1]);
}

// ─── Bulk ────────────────────────────────────────────────────────────────────

#[test]
fn bulk_push_then_pop_drains_in_reverse() {
    let mut stack = Stack::with_capacity(16);
    for i in 0..BULK {
        stack.push(i);
    }
    for i in (0..BULK).rev() {
        assert_eq!(stack.pop(), Ok(i));
    }
    assert!(stack.is_empty());
}
